use aloft_geom::Vec3;
use aloft_world::{
    DEFAULT_TABLE_COUNT, ParamError, TerrainParams, WorldSeed, height_at, is_below_terrain,
    slope_at,
};

#[test]
fn world_seed_expands_to_requested_tables() {
    let seed = WorldSeed::generate(42, DEFAULT_TABLE_COUNT);
    assert_eq!(seed.len(), 9);
    assert_eq!(seed.seed(), 42);
    // Independent tables: adjacent octaves must not share a shuffle.
    assert_ne!(seed.tables()[0].as_array(), seed.tables()[1].as_array());
}

#[test]
fn height_is_deterministic_across_seed_rebuilds() {
    let params = TerrainParams::default();
    let a = WorldSeed::generate(1337, DEFAULT_TABLE_COUNT);
    let b = WorldSeed::generate(1337, DEFAULT_TABLE_COUNT);
    for i in 0..64 {
        let x = i as f32 * 91.7 - 2000.0;
        let z = i as f32 * 53.1 + 500.0;
        assert_eq!(
            height_at(x, z, &a, &params).to_bits(),
            height_at(x, z, &b, &params).to_bits()
        );
    }
}

#[test]
fn height_respects_amplitude_bound() {
    let params = TerrainParams::default();
    let seed = WorldSeed::generate(7, DEFAULT_TABLE_COUNT);
    for i in 0..100 {
        for j in 0..100 {
            let x = i as f32 * 37.3 - 1500.0;
            let z = j as f32 * 41.9 - 1500.0;
            let h = height_at(x, z, &seed, &params);
            assert!(h.abs() <= params.height.amplitude + 1e-3);
        }
    }
}

#[test]
fn different_seeds_give_different_terrain() {
    let params = TerrainParams::default();
    let a = WorldSeed::generate(1, DEFAULT_TABLE_COUNT);
    let b = WorldSeed::generate(2, DEFAULT_TABLE_COUNT);
    let mut differs = false;
    for i in 0..32 {
        let x = i as f32 * 113.0;
        if height_at(x, 77.0, &a, &params) != height_at(x, 77.0, &b, &params) {
            differs = true;
            break;
        }
    }
    assert!(differs);
}

#[test]
fn empty_seed_is_flat_sea_level() {
    let params = TerrainParams::default();
    let seed = WorldSeed::generate(9, 0);
    assert_eq!(height_at(123.0, -456.0, &seed, &params), 0.0);
}

#[test]
fn below_terrain_predicate_matches_height() {
    let params = TerrainParams::default();
    let seed = WorldSeed::generate(2024, DEFAULT_TABLE_COUNT);
    let h = height_at(300.0, -800.0, &seed, &params);
    assert!(is_below_terrain(Vec3::new(300.0, h - 0.5, -800.0), &seed, &params));
    assert!(!is_below_terrain(Vec3::new(300.0, h + 0.5, -800.0), &seed, &params));
}

#[test]
fn slope_is_nonnegative_and_finite() {
    let params = TerrainParams::default();
    let seed = WorldSeed::generate(555, DEFAULT_TABLE_COUNT);
    for i in 0..50 {
        let x = i as f32 * 71.0 - 900.0;
        let s = slope_at(x, x * 0.5, &seed, &params);
        assert!(s.is_finite());
        assert!(s >= 0.0);
    }
}

#[test]
fn validate_rejects_bad_configs() {
    let mut p = TerrainParams::default();
    p.chunk.size = 0.0;
    assert_eq!(p.validate(), Err(ParamError::NonPositiveChunkSize(0.0)));

    let mut p = TerrainParams::default();
    p.chunk.resolution = 0;
    assert_eq!(p.validate(), Err(ParamError::ZeroResolution));

    let mut p = TerrainParams::default();
    p.chunk.lod_scale = 0.5;
    assert_eq!(p.validate(), Err(ParamError::LodScaleBelowOne(0.5)));

    let mut p = TerrainParams::default();
    p.height.wavelength = -10.0;
    assert_eq!(p.validate(), Err(ParamError::NonPositiveWavelength(-10.0)));

    let mut p = TerrainParams::default();
    p.height.amplitude = 0.0;
    assert_eq!(p.validate(), Err(ParamError::NonPositiveAmplitude(0.0)));

    let mut p = TerrainParams::default();
    p.decorations.radius = -1;
    assert_eq!(p.validate(), Err(ParamError::NegativeDecorationRadius(-1)));

    assert!(TerrainParams::default().validate().is_ok());
}

#[test]
fn params_parse_from_partial_toml() {
    let src = r#"
        [height]
        amplitude = 200.0

        [chunk]
        resolution = 16
    "#;
    let p: TerrainParams = toml::from_str(src).unwrap();
    assert_eq!(p.height.amplitude, 200.0);
    assert_eq!(p.chunk.resolution, 16);
    // Unspecified sections fall back to defaults.
    assert_eq!(p.chunk.size, TerrainParams::default().chunk.size);
    assert_eq!(p.water.level, 0.0);
    assert!(p.validate().is_ok());
}
