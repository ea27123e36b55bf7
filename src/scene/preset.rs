use std::collections::BTreeMap;

use crate::{
    animation::curve::BreakpointCurve,
    animation::ease::Ease,
    animation::looping::{LoopKeyframe, LoopSpec, Period, RepeatMode},
    animation::tween::AnimationSpec,
    animation::value::{Rgba8, Transform, Value},
    engine::motion::EngineSettings,
    foundation::core::{Millis, Vec2, ViewportSize},
    foundation::error::KineticResult,
    scene::model::{Bounds, ElementSpec, LoopBinding, PageSpec, RevealBinding, ScrollBinding},
    scroll::progress::ScrollOffsets,
    sequence::sequencer::SequenceSpec,
    viewport::trigger::{Margin, ViewportOptions},
};

const WIDTH: f64 = 1280.0;
const HEIGHT: f64 = 800.0;
const PROJECTS: usize = 4;
const ROLES: usize = 3;
const PARTICLES: usize = 20;
const TITLE_SPANS: usize = 3;

/// The animated portfolio page: hero parallax, fading sections, staggered
/// cards, a reading progress bar, drifting particles, and spinning shapes.
///
/// Particle positions and periods are drawn from `seed`.
pub fn portfolio(seed: u64) -> KineticResult<PageSpec> {
    let mut elements = BTreeMap::new();
    let mut place = |id: String, bounds: Option<Bounds>| {
        elements.insert(
            id,
            ElementSpec {
                bounds,
                mount_at: Millis::ZERO,
            },
        );
    };

    place("progress_bar".into(), Some(Bounds::new(0.0, 0.0, WIDTH, 4.0)));
    place("hero".into(), Some(Bounds::new(0.0, 0.0, WIDTH, HEIGHT)));
    place("projects".into(), Some(Bounds::new(0.0, 800.0, WIDTH, 1400.0)));
    place("experience".into(), Some(Bounds::new(0.0, 2200.0, WIDTH, 1200.0)));
    place("contact".into(), Some(Bounds::new(0.0, 3400.0, WIDTH, 600.0)));
    for i in 0..PROJECTS {
        let (col, row) = ((i % 2) as f64, (i / 2) as f64);
        place(
            format!("project{i}"),
            Some(Bounds::new(
                160.0 + col * 500.0,
                1000.0 + row * 500.0,
                460.0,
                420.0,
            )),
        );
    }
    for i in 0..ROLES {
        place(
            format!("role{i}"),
            Some(Bounds::new(240.0, 2350.0 + i as f64 * 330.0, 800.0, 280.0)),
        );
    }
    for i in 0..TITLE_SPANS {
        place(format!("title{i}"), None);
    }
    for i in 0..PARTICLES {
        place(format!("particle{i}"), None);
    }
    place("shape0".into(), None);
    place("shape1".into(), None);

    Ok(PageSpec {
        settings: EngineSettings {
            seed,
            ..EngineSettings::default()
        },
        viewport: ViewportSize::new(WIDTH, HEIGHT)?,
        document_height: 4000.0,
        elements,
        scroll: scroll_bindings()?,
        reveals: reveals(),
        loops: loops(),
    })
}

fn scroll_bindings() -> KineticResult<Vec<ScrollBinding>> {
    let number = |inputs: &[f64], outputs: &[f64]| {
        BreakpointCurve::from_pairs(inputs, outputs.iter().copied().map(Value::Number).collect())
    };

    let mut out = vec![
        ScrollBinding {
            property: "progress_bar.scale_x".into(),
            element: None,
            offsets: ScrollOffsets::default(),
            curve: number(&[0.0, 1.0], &[0.0, 1.0])?,
        },
        // Hero drifts down half its height and shrinks while it scrolls away.
        ScrollBinding {
            property: "hero.transform".into(),
            element: Some("hero".into()),
            offsets: ScrollOffsets::START_TO_END,
            curve: BreakpointCurve::from_pairs(
                &[0.0, 1.0],
                vec![
                    Value::Transform(Transform::default()),
                    Value::Transform(Transform {
                        translate: Vec2::new(0.0, HEIGHT * 0.5),
                        scale: Vec2::new(0.8, 0.8),
                        ..Transform::default()
                    }),
                ],
            )?,
        },
        ScrollBinding {
            property: "hero.opacity".into(),
            element: Some("hero".into()),
            offsets: ScrollOffsets::START_TO_END,
            curve: number(&[0.0, 0.5, 1.0], &[1.0, 0.5, 0.0])?,
        },
    ];

    for section in ["projects", "experience"] {
        out.push(ScrollBinding {
            property: format!("{section}.opacity"),
            element: Some(section.into()),
            offsets: ScrollOffsets::ENTER_EXIT,
            curve: number(&[0.0, 0.2, 0.8, 1.0], &[0.0, 1.0, 1.0, 0.0])?,
        });
    }
    // Only the projects grid grows in as it enters.
    out.push(ScrollBinding {
        property: "projects.scale".into(),
        element: Some("projects".into()),
        offsets: ScrollOffsets::ENTER_EXIT,
        curve: number(&[0.0, 0.2], &[0.8, 1.0])?,
    });
    Ok(out)
}

fn entrance(property: String, from: impl Into<Value>, to: impl Into<Value>) -> AnimationSpec {
    AnimationSpec::from_to(property, from, to, Millis(500)).with_ease(Ease::OutCubic)
}

fn reveals() -> Vec<RevealBinding> {
    let hero_items = ["greeting", "name", "tagline", "cta"];
    let hero = |field: &str, from: Value, to: Value| RevealBinding {
        element: "hero".into(),
        options: ViewportOptions::once(),
        sequence: SequenceSpec::new(
            hero_items
                .iter()
                .map(|item| entrance(format!("hero.{item}.{field}"), from, to))
                .collect(),
            Millis(300),
            Millis(200),
        ),
    };

    let mut out = vec![
        hero("opacity", 0.0.into(), 1.0.into()),
        hero(
            "transform",
            Transform::translate(0.0, 20.0).into(),
            Transform::default().into(),
        ),
    ];

    let card = ViewportOptions::once().with_margin(Margin::uniform(-100.0));
    for i in 0..PROJECTS {
        out.push(RevealBinding {
            element: format!("project{i}"),
            options: card,
            sequence: SequenceSpec::new(
                vec![
                    entrance(format!("project{i}.opacity"), 0.0, 1.0),
                    entrance(
                        format!("project{i}.transform"),
                        Transform::translate(0.0, 50.0),
                        Transform::default(),
                    ),
                ],
                Millis(i as u64 * 100),
                Millis::ZERO,
            ),
        });
    }
    for i in 0..ROLES {
        out.push(RevealBinding {
            element: format!("role{i}"),
            options: card,
            sequence: SequenceSpec::new(
                vec![
                    entrance(format!("role{i}.opacity"), 0.0, 1.0),
                    entrance(
                        format!("role{i}.transform"),
                        Transform::translate(-50.0, 0.0),
                        Transform::default(),
                    ),
                ],
                Millis(i as u64 * 200),
                Millis::ZERO,
            ),
        });
    }
    out
}

fn loops() -> Vec<LoopBinding> {
    let mut out = Vec::new();

    let lilac = Rgba8::rgb(0xe9, 0xd5, 0xff);
    let pink = Rgba8::rgb(0xf0, 0xab, 0xfc);
    for i in 0..TITLE_SPANS {
        out.push(LoopBinding {
            element: format!("title{i}"),
            animation: LoopSpec::new(
                format!("title{i}.color"),
                [lilac, pink, lilac]
                    .into_iter()
                    .map(|c| LoopKeyframe::Fixed(Value::Color(c)))
                    .collect(),
                Millis(3000),
                RepeatMode::Restart,
            )
            .with_delay(Millis(i as u64 * 200))
            .with_ease(Ease::InOutQuad),
        });
    }

    let drift = |axis: &str, extent: f64, i: usize| LoopBinding {
        element: format!("particle{i}"),
        animation: LoopSpec::new(
            format!("particle{i}.{axis}"),
            vec![
                LoopKeyframe::Random {
                    random: [0.0, extent],
                },
                LoopKeyframe::Random {
                    random: [0.0, extent],
                },
            ],
            Period::Random {
                random: [10_000, 20_000],
            },
            RepeatMode::Mirror,
        ),
    };
    for i in 0..PARTICLES {
        out.push(drift("x", WIDTH, i));
        out.push(drift("y", HEIGHT, i));
    }

    for (i, period) in [20_000, 15_000].into_iter().enumerate() {
        out.push(LoopBinding {
            element: format!("shape{i}"),
            animation: LoopSpec::new(
                format!("shape{i}.rotate"),
                vec![0.0.into(), 360.0.into()],
                Millis(period),
                RepeatMode::Restart,
            ),
        });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/preset.rs"]
mod tests;
