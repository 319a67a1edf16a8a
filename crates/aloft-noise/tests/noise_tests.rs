use aloft_noise::{Permutation256, noise, noise_tiled};

#[test]
fn permutation_is_a_bijection() {
    let p = Permutation256::from_seed(42);
    let mut seen = [false; 256];
    for &v in p.as_array() {
        assert!(!seen[v as usize], "value {v} appears twice");
        seen[v as usize] = true;
    }
    assert!(seen.iter().all(|&b| b));
}

#[test]
fn permutation_same_seed_same_table() {
    let a = Permutation256::from_seed(0xDEAD_BEEF);
    let b = Permutation256::from_seed(0xDEAD_BEEF);
    assert_eq!(a, b);
}

#[test]
fn permutation_different_seeds_differ() {
    let a = Permutation256::from_seed(1);
    let b = Permutation256::from_seed(2);
    assert_ne!(a, b);
}

#[test]
fn noise_is_deterministic() {
    let p = Permutation256::from_seed(7);
    for i in 0..64 {
        let x = i as f32 * 0.37 - 11.0;
        let y = i as f32 * 0.53 + 3.0;
        let a = noise(x, y, &p);
        let b = noise(x, y, &p);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn noise_is_zero_on_lattice_points() {
    let p = Permutation256::from_seed(9001);
    for xi in -8i32..=8 {
        for yi in -8i32..=8 {
            let n = noise(xi as f32, yi as f32, &p);
            assert_eq!(n, 0.0, "lattice point ({xi}, {yi}) gave {n}");
        }
    }
}

#[test]
fn noise_stays_in_unit_range() {
    let p = Permutation256::from_seed(1234);
    for i in 0..200 {
        for j in 0..200 {
            let x = i as f32 * 0.173 - 17.0;
            let y = j as f32 * 0.219 - 22.0;
            let n = noise(x, y, &p);
            assert!(n.abs() <= 1.0 + 1e-5, "noise({x}, {y}) = {n} out of range");
        }
    }
}

#[test]
fn noise_is_continuous_across_cell_boundaries() {
    let p = Permutation256::from_seed(5150);
    let eps = 1e-3f32;
    for i in -4i32..=4 {
        let x = i as f32;
        for j in 0..10 {
            let y = j as f32 * 0.31 + 0.05;
            let lo = noise(x - eps, y, &p);
            let hi = noise(x + eps, y, &p);
            // Gradient magnitude is bounded, so a small step moves the value
            // by a small amount even across the lattice line.
            assert!((hi - lo).abs() < 0.05, "jump at x={x}, y={y}: {lo} vs {hi}");
        }
    }
}

#[test]
fn tiled_noise_repeats_exactly() {
    let p = Permutation256::from_seed(31337);
    let repeat = 8u32;
    for i in 0..64 {
        for j in 0..64 {
            // Eighth-steps are exact in f32, so x + 8.0 loses no bits.
            let x = i as f32 * 0.125;
            let y = j as f32 * 0.125;
            let a = noise_tiled(x, y, repeat, &p);
            let bx = noise_tiled(x + repeat as f32, y, repeat, &p);
            let by = noise_tiled(x, y + repeat as f32, repeat, &p);
            assert_eq!(a.to_bits(), bx.to_bits());
            assert_eq!(a.to_bits(), by.to_bits());
        }
    }
}

#[test]
fn tiled_noise_matches_untiled_inside_first_tile() {
    let p = Permutation256::from_seed(60);
    // Within [0, repeat) the wrapped lattice indices are the originals.
    for i in 0..32 {
        for j in 0..32 {
            let x = i as f32 * 0.25;
            let y = j as f32 * 0.25;
            let a = noise(x, y, &p);
            let b = noise_tiled(x, y, 1024, &p);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
