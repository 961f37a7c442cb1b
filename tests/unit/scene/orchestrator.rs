use super::*;
use crate::timeline::model::AssetRef;
use serde_json::json;

fn logo_doc() -> Value {
    json!({
        "template video json": [{
            "elementName": "logo",
            "assetType": "image",
            "assetName": "logo_png",
            "initialState": {"opacity": 0, "position": {"x": 960, "y": 540}},
            "timeline": {
                "opacity": [{"startTime": 1, "endTime": 2, "startValue": 0, "endValue": 1,
                             "easeIn": "Linear", "easeOut": "Linear"}]
            }
        }]
    })
}

#[test]
fn logo_fades_in_and_scene_finishes() {
    let mut scene = Scene::load(&logo_doc(), &AssetMap::new(), CoordinateSpace::default()).unwrap();
    assert_eq!(scene.warnings().len(), 1);
    assert_eq!(scene.target("logo").unwrap().alpha, 0.0);
    assert!(!scene.is_finished());

    let _ = scene.play();
    scene.advance(1500.0);
    let mid = scene.target("logo").unwrap().alpha;
    assert!((mid - 0.5).abs() < 1e-9, "{mid}");

    let elapsed = scene.run(&RunOpts::default()).unwrap();
    assert!(elapsed > 0.0);
    assert!(scene.is_finished());
    assert_eq!(scene.target("logo").unwrap().alpha, 1.0);
}

#[test]
fn invalid_documents_spawn_nothing() {
    let doc = json!({
        "template video json": [{
            "elementName": "logo", "assetType": "image", "assetName": "x",
            "timeline": {"position": [
                {"startTime": 0, "endTime": 5}, {"startTime": 3, "endTime": 8}
            ]}
        }]
    });
    let err = Scene::load(&doc, &AssetMap::new(), CoordinateSpace::default()).unwrap_err();
    match err {
        ReelError::Validation(msg) => assert!(msg.contains("overlap"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_asset_type_falls_back_to_asset_map_kind() {
    let doc = json!({
        "template video json": [{
            "elementName": "hero", "assetType": "custom", "assetName": "hero_skel"
        }]
    });
    let mut assets = AssetMap::new();
    let _ = assets.insert(
        "hero_skel".to_owned(),
        AssetRef {
            url: "hero.json".to_owned(),
            kind: AssetKind::Skeleton,
        },
    );
    let scene = Scene::load(&doc, &assets, CoordinateSpace::default()).unwrap();
    assert_eq!(scene.target("hero").unwrap().kind, TargetKind::Skeleton);

    let scene = Scene::load(&doc, &AssetMap::new(), CoordinateSpace::default()).unwrap();
    assert_eq!(scene.target("hero").unwrap().kind, TargetKind::Unknown);
}

#[test]
fn teardown_leaves_engine_idle_and_allows_replay() {
    let mut scene = Scene::load(&logo_doc(), &AssetMap::new(), CoordinateSpace::default()).unwrap();
    let _ = scene.play();
    scene.advance(1200.0);
    assert!(!scene.engine().manager().is_idle());

    scene.teardown();
    assert!(scene.engine().manager().is_idle());
    assert_eq!(scene.engine().sequences().pending_timers(), 0);
    assert!(!scene.is_finished());

    let _ = scene.play();
    let _ = scene.run(&RunOpts::default()).unwrap();
    assert_eq!(scene.target("logo").unwrap().alpha, 1.0);
}

#[test]
fn run_opts_fill_missing_fields_with_defaults() {
    let opts: RunOpts = serde_json::from_value(json!({"step_ms": 10.0})).unwrap();
    assert_eq!(opts.step_ms, 10.0);
    assert_eq!(opts.limit_ms, RunOpts::default().limit_ms);
}
