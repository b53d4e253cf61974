// Tests for parameter defaults, variant parsing and toggle mapping.

use arena_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_have_logical_relationships() {
    assert!(GRAVITY > 0.0 && JUMP_IMPULSE > GRAVITY);
    assert!(MOVE_SPEED > 0.0);
    assert!(ORBIT_RADIUS > 0.0 && ORBIT_HEIGHT > 0.0);
    // the sky sphere has to fit inside the far plane from anywhere on the floor
    assert!(SKY_RADIUS + FLOOR_SIZE < CAMERA_ZFAR);
    assert!(BLOB_SHADOW_Y > 0.0 && BLOB_SHADOW_Y < GROUND_HEIGHT);
    assert!(BLOB_SHADOW_OPACITY > 0.0 && BLOB_SHADOW_OPACITY <= 1.0);
}

#[test]
fn params_default_to_constants() {
    let p = SimParams::default();
    assert_eq!(p.variant, SceneVariant::Basic);
    assert_eq!(p.basis, MovementBasis::CameraDirection);
    assert_eq!(p.move_speed, MOVE_SPEED);
    assert_eq!(p.gravity, GRAVITY);
    assert_eq!(p.jump_impulse, JUMP_IMPULSE);
    assert_eq!(p.ground_height, GROUND_HEIGHT);
}

#[test]
fn variant_and_basis_parse_case_insensitively() {
    assert_eq!("bloom".parse::<SceneVariant>(), Ok(SceneVariant::Bloom));
    assert_eq!(" Basic ".parse::<SceneVariant>(), Ok(SceneVariant::Basic));
    assert_eq!("YAW".parse::<MovementBasis>(), Ok(MovementBasis::YawTrig));
    assert_eq!("camera".parse::<MovementBasis>(), Ok(MovementBasis::CameraDirection));
    assert_eq!(
        "godrays".parse::<SceneVariant>(),
        Err(ConfigError::UnknownVariant("godrays".into()))
    );
    assert!(matches!(
        "orbit".parse::<MovementBasis>(),
        Err(ConfigError::UnknownBasis(_))
    ));
}

#[test]
fn display_round_trips_through_from_str() {
    for v in [SceneVariant::Basic, SceneVariant::Bloom] {
        assert_eq!(v.to_string().parse::<SceneVariant>(), Ok(v));
    }
    for b in [MovementBasis::CameraDirection, MovementBasis::YawTrig] {
        assert_eq!(b.to_string().parse::<MovementBasis>(), Ok(b));
    }
}

#[test]
fn query_string_overrides_defaults() {
    let p = SimParams::default()
        .with_query("?variant=bloom&debug=1&basis=yaw")
        .unwrap();
    assert_eq!(p.variant, SceneVariant::Bloom);
    assert_eq!(p.basis, MovementBasis::YawTrig);

    let p = SimParams::default().with_query("").unwrap();
    assert_eq!(p, SimParams::default());

    let err = SimParams::default().with_query("variant=neon").unwrap_err();
    assert_eq!(err, ConfigError::UnknownVariant("neon".into()));
    assert!(err.to_string().contains("neon"));
}

#[test]
fn glow_drives_emissive_and_bloom_only_in_bloom_variant() {
    let on = VisualToggles::default();
    let off = VisualToggles {
        glow: false,
        ..on
    };
    let basic = RenderFlags::from_toggles(on, SceneVariant::Basic);
    assert_eq!(basic.player_emissive, PLAYER_GLOW_INTENSITY);
    assert!(!basic.bloom);
    let bloom = RenderFlags::from_toggles(on, SceneVariant::Bloom);
    assert!(bloom.bloom);
    let dark = RenderFlags::from_toggles(off, SceneVariant::Bloom);
    assert_eq!(dark.player_emissive, 0.0);
    assert!(!dark.bloom);
}

#[test]
fn shadow_toggle_swaps_real_and_blob_shadow() {
    let mut t = VisualToggles::default();
    let f = RenderFlags::from_toggles(t, SceneVariant::Basic);
    assert!(f.shadows && !f.blob_shadow_visible);
    t.set(Toggle::Shadow, false);
    let f = RenderFlags::from_toggles(t, SceneVariant::Basic);
    assert!(!f.shadows && f.blob_shadow_visible);
}

#[test]
fn toggles_are_independent() {
    for target in Toggle::ALL {
        let mut t = VisualToggles::default();
        t.set(target, false);
        for other in Toggle::ALL {
            assert_eq!(t.get(other), other != target, "{} vs {}", target.name(), other.name());
        }
    }
}

#[test]
fn applying_toggles_is_idempotent() {
    let mut t = VisualToggles::default();
    t.set(Toggle::Sun, false);
    t.set(Toggle::Sun, false);
    let a = RenderFlags::from_toggles(t, SceneVariant::Bloom);
    let b = RenderFlags::from_toggles(t, SceneVariant::Bloom);
    assert_eq!(a, b);
    assert!(!a.sun_visible);
    assert!(!t.flip(Toggle::Skybox));
    assert!(t.flip(Toggle::Skybox));
}
