use crate::{
    foundation::core::{Affine, Vec2},
    foundation::error::{KineticError, KineticResult},
    foundation::math::lerp_f64,
};

/// Component-wise linear interpolation.
pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(lerp_f64(a.x, b.x, t), lerp_f64(a.y, b.y, t))
    }
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serialized as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(s: &str) -> KineticResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> KineticResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| KineticError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(KineticError::validation("hex color must be ASCII"));
        }
        match s.len() {
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self::rgba(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
                hex_byte(&s[6..8])?,
            )),
            _ => Err(KineticError::validation(
                "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            )),
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Euler rotation in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Composite visual transform: translation, per-axis scale, and 3D rotation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Transform {
    pub translate: Vec2,
    pub scale: Vec2, // default (1,1)
    pub rotate: Rotation,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotate: Rotation::default(),
        }
    }
}

impl Transform {
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate: Vec2::new(x, y),
            ..Self::default()
        }
    }

    pub fn scale(s: f64) -> Self {
        Self {
            scale: Vec2::new(s, s),
            ..Self::default()
        }
    }

    pub fn rotate(x: f64, y: f64, z: f64) -> Self {
        Self {
            rotate: Rotation { x, y, z },
            ..Self::default()
        }
    }

    /// Flatten to a 2D affine about `anchor`, keeping only the z rotation.
    pub fn to_affine(self, anchor: Vec2) -> Affine {
        let t_translate = Affine::translate(self.translate);
        let t_anchor = Affine::translate(anchor);
        let t_unanchor = Affine::translate(-anchor);
        let t_rotate = Affine::rotate(self.rotate.z.to_radians());
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

impl Lerp for Transform {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            scale: <Vec2 as Lerp>::lerp(&a.scale, &b.scale, t),
            rotate: Rotation {
                x: lerp_f64(a.rotate.x, b.rotate.x, t),
                y: lerp_f64(a.rotate.y, b.rotate.y, t),
                z: lerp_f64(a.rotate.z, b.rotate.z, t),
            },
        }
    }
}

/// Discriminant of [`Value`], used to reject mixed curves at binding time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Number,
    Color,
    Transform,
}

/// Any animatable property value.
///
/// In JSON a number is a [`Value::Number`], a hex string is a
/// [`Value::Color`], and an object is a [`Value::Transform`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Color(Rgba8),
    Transform(Transform),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Number,
            Self::Color(_) => ValueKind::Color,
            Self::Transform(_) => ValueKind::Transform,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgba8> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_transform(&self) -> Option<Transform> {
        match self {
            Self::Transform(t) => Some(*t),
            _ => None,
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        match self {
            Self::Number(v) => v.is_finite(),
            Self::Color(_) => true,
            Self::Transform(t) => {
                let r = t.rotate;
                t.translate.is_finite()
                    && t.scale.is_finite()
                    && r.x.is_finite()
                    && r.y.is_finite()
                    && r.z.is_finite()
            }
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<Rgba8> for Value {
    fn from(c: Rgba8) -> Self {
        Self::Color(c)
    }
}

impl From<Transform> for Value {
    fn from(t: Transform) -> Self {
        Self::Transform(t)
    }
}

impl Lerp for Value {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Number(x), Self::Number(y)) => Self::Number(<f64 as Lerp>::lerp(x, y, t)),
            (Self::Color(x), Self::Color(y)) => Self::Color(Rgba8::lerp(x, y, t)),
            (Self::Transform(x), Self::Transform(y)) => Self::Transform(Transform::lerp(x, y, t)),
            // Mixed kinds are rejected when curves are built; step if one slips through.
            _ => {
                if t < 1.0 {
                    *a
                } else {
                    *b
                }
            }
        }
    }
}

/// Check that every value in `values` shares one kind and is finite.
pub(crate) fn uniform_kind<'a>(
    values: impl IntoIterator<Item = &'a Value>,
) -> KineticResult<Option<ValueKind>> {
    let mut kind = None;
    for v in values {
        if !v.is_finite() {
            return Err(KineticError::config("animated values must be finite"));
        }
        match kind {
            None => kind = Some(v.kind()),
            Some(k) if k != v.kind() => {
                return Err(KineticError::config(format!(
                    "cannot interpolate between {k:?} and {:?}",
                    v.kind()
                )));
            }
            Some(_) => {}
        }
    }
    Ok(kind)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
