use super::*;
use slotmap::SlotMap;

#[test]
fn map_reports_only_laid_out_elements() {
    let mut ids: SlotMap<ElementId, ()> = SlotMap::with_key();
    let a = ids.insert(());
    let b = ids.insert(());

    let mut geo = GeometryMap::new();
    geo.set(a, Rect::new(0.0, 10.0, 20.0, 30.0));
    assert_eq!(geo.bounds(a), Some(Rect::new(0.0, 10.0, 20.0, 30.0)));
    assert_eq!(geo.bounds(b), None);

    assert!(geo.clear(a).is_some());
    assert_eq!(geo.bounds(a), None);
}

#[test]
fn closures_act_as_geometry() {
    let mut ids: SlotMap<ElementId, ()> = SlotMap::with_key();
    let a = ids.insert(());
    let fixed = |_: ElementId| Some(Rect::new(0.0, 0.0, 1.0, 1.0));
    assert_eq!(fixed.bounds(a).map(|r| r.area()), Some(1.0));
}
