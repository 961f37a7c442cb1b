use super::*;

fn all_curves() -> Vec<Ease> {
    let mut out = vec![Ease::Linear];
    for family in EaseFamily::ALL {
        for dir in [EaseDir::In, EaseDir::Out, EaseDir::InOut] {
            out.push(Ease::Curve(family, dir));
        }
    }
    out
}

#[test]
fn endpoints_are_stable() {
    for ease in all_curves() {
        assert_eq!(ease.apply(0.0), 0.0, "{ease}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease}");
        assert_eq!(ease.apply(-3.0), 0.0, "{ease}");
        assert_eq!(ease.apply(7.0), 1.0, "{ease}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in all_curves() {
        if let Ease::Curve(EaseFamily::Back | EaseFamily::Elastic | EaseFamily::Bounce, _) = ease {
            continue;
        }
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease}");
        assert!(b < c, "{ease}");
    }
}

#[test]
fn names_round_trip_through_display() {
    for ease in all_curves() {
        assert_eq!(Ease::from_name(&ease.to_string()).unwrap(), ease);
    }
}

#[test]
fn parses_whitelist_forms() {
    assert_eq!(Ease::from_name("linear").unwrap(), Ease::Linear);
    assert_eq!(
        Ease::from_name("Quad.easeInOut").unwrap(),
        Ease::Curve(EaseFamily::Quad, EaseDir::InOut)
    );
    assert_eq!(
        Ease::from_name("sine.in").unwrap(),
        Ease::Curve(EaseFamily::Sine, EaseDir::In)
    );
    assert_eq!(
        Ease::from_name("Cubic").unwrap(),
        Ease::Curve(EaseFamily::Cubic, EaseDir::Out)
    );
    assert!(Ease::from_name("Wobble").is_err());
    assert!(Ease::from_name("Quad.sideways").is_err());
    assert!(!Ease::is_known_name(""));
}

#[test]
fn in_out_pairs_combine() {
    assert_eq!(Ease::from_in_out("Linear", "Linear").unwrap(), Ease::Linear);
    assert_eq!(
        Ease::from_in_out("Linear", "Quad").unwrap(),
        Ease::Curve(EaseFamily::Quad, EaseDir::Out)
    );
    assert_eq!(
        Ease::from_in_out("Expo", "Linear").unwrap(),
        Ease::Curve(EaseFamily::Expo, EaseDir::In)
    );
    assert_eq!(
        Ease::from_in_out("Sine", "Cubic").unwrap(),
        Ease::Curve(EaseFamily::Sine, EaseDir::InOut)
    );
    assert!(Ease::from_in_out("Linear", "Nope").is_err());
}

#[test]
fn serde_uses_names() {
    let e: Ease = serde_json::from_str("\"Back.easeOut\"").unwrap();
    assert_eq!(e, Ease::Curve(EaseFamily::Back, EaseDir::Out));
    assert_eq!(serde_json::to_string(&e).unwrap(), "\"Back.easeOut\"");
    assert!(serde_json::from_str::<Ease>("\"Zigzag\"").is_err());
}
