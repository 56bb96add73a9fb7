//! Regression tests for seeded region growing and merging

use seedgrow_core::{Pix, PixelDepth};
use seedgrow_region::{BorderPolicy, GrowerOptions, MergeStrategy, RegionGrower};
use seedgrow_test::{RegParams, load_test_image_gray};

fn gray(rows: &[&[u8]]) -> Pix {
    let pix = Pix::new(rows[0].len() as u32, rows.len() as u32, PixelDepth::Bit8).unwrap();
    let mut pm = pix.to_mut();
    for (y, row) in rows.iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            pm.set_pixel(x as u32, y as u32, v as u32).unwrap();
        }
    }
    pm.into()
}

fn two_blocks() -> Pix {
    gray(&[
        &[10, 10, 200, 200],
        &[10, 10, 200, 200],
        &[10, 10, 200, 200],
        &[10, 10, 200, 200],
    ])
}

/// Count right/down neighbor pairs with different labels.
fn differing_adjacencies(grower: &RegionGrower) -> u64 {
    let (w, h) = (grower.width(), grower.height());
    let mut count = 0;
    for y in 0..h {
        for x in 0..w {
            let l = grower.label_at(x, y).unwrap();
            if x + 1 < w && grower.label_at(x + 1, y).unwrap() != l {
                count += 1;
            }
            if y + 1 < h && grower.label_at(x, y + 1).unwrap() != l {
                count += 1;
            }
        }
    }
    count
}

// ============================================================================
// Two flat blocks
// ============================================================================

#[test]
fn test_two_blocks_stay_apart() {
    let mut rp = RegParams::new("grower_blocks");
    let options = GrowerOptions::new().with_seed_count(2).with_color_seed(11);
    let mut grower = RegionGrower::with_options(&two_blocks(), options).unwrap();

    rp.compare_values(2.0, grower.seed(2).unwrap() as f64, 0.0);
    rp.compare_values(14.0, grower.grow() as f64, 0.0);
    for y in 0..4 {
        rp.compare_values(1.0, grower.label_at(0, y).unwrap() as f64, 0.0);
        rp.compare_values(1.0, grower.label_at(1, y).unwrap() as f64, 0.0);
        rp.compare_values(2.0, grower.label_at(2, y).unwrap() as f64, 0.0);
        rp.compare_values(2.0, grower.label_at(3, y).unwrap() as f64, 0.0);
    }

    let stats = grower.compute_border_stats();
    rp.compare_values(4.0, stats.effectiveness(1, 2) as f64, 0.0);
    rp.compare_values(0.0, stats.similarity(1, 2), 0.0);
    rp.compare_values(4.0, stats.total_events() as f64, 0.0);

    rp.compare_values(0.0, grower.merge().unwrap() as f64, 0.0);
    rp.compare_values(0.0, grower.border_stats().similarity(1, 2), 0.0);
    rp.check(grower.region_mapping() == [0, 1, 2], "identity mapping");

    let colors = grower.colorize().unwrap();
    rp.compare_values(2.0, colors.count_distinct_values() as f64, 0.0);
    rp.check(
        colors.get_pixel(0, 0) != colors.get_pixel(3, 0),
        "blocks have different colors",
    );
    assert!(rp.cleanup());
}

// ============================================================================
// Uniform grid
// ============================================================================

#[test]
fn test_uniform_grid_collapses() {
    let mut rp = RegParams::new("grower_uniform");
    let pix = gray(&[&[50; 4], &[50; 4], &[50; 4], &[50; 4]]);
    let options = GrowerOptions::new().with_seed_count(4).with_color_seed(5);
    let mut grower = RegionGrower::with_options(&pix, options).unwrap();

    grower.seed(4).unwrap();
    grower.grow();
    rp.check(grower.labels().iter().all(|&l| l != 0), "grid fully labeled");

    grower.compute_border_stats();
    let merged = grower.merge().unwrap();
    rp.compare_values(3.0, merged as f64, 0.0);

    // every normalized border is fully similar
    let stats = grower.border_stats();
    for i in 1..=4 {
        for j in i..=4 {
            if stats.effectiveness(i, j) > 0 {
                rp.compare_values(1.0, stats.similarity(i, j), 0.0);
            }
        }
    }

    rp.check(grower.labels().iter().all(|&l| l == 1), "single label");
    let colors = grower.colorize().unwrap();
    rp.compare_values(1.0, colors.count_distinct_values() as f64, 0.0);
    assert!(rp.cleanup());
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_growth_is_idempotent() {
    let pix = load_test_image_gray("quadrants.pgm").unwrap();
    let options = GrowerOptions::new().with_seed_count(4);
    let mut grower = RegionGrower::with_options(&pix, options).unwrap();
    grower.seed(4).unwrap();
    grower.grow();
    let before = grower.labels().to_vec();
    assert_eq!(grower.grow(), 0);
    assert_eq!(grower.labels(), &before[..]);
}

#[test]
fn test_effectiveness_sums_to_differing_adjacencies() {
    let pix = gray(&[
        &[10, 11, 40, 41, 90],
        &[12, 10, 42, 40, 91],
        &[70, 71, 72, 40, 90],
        &[70, 70, 71, 120, 121],
    ]);
    for policy in [BorderPolicy::Canonical, BorderPolicy::Directional] {
        let options = GrowerOptions::new().with_border_policy(policy);
        let mut grower = RegionGrower::with_options(&pix, options).unwrap();
        grower.seed(9).unwrap();
        grower.grow();
        let expected = differing_adjacencies(&grower);
        assert!(expected > 0);
        assert_eq!(grower.compute_border_stats().total_events(), expected);
    }
}

#[test]
fn test_final_labels_follow_mapping() {
    let pix = load_test_image_gray("quadrants.pgm").unwrap();
    for strategy in [MergeStrategy::SinglePass, MergeStrategy::UnionFind] {
        let options = GrowerOptions::new()
            .with_seed_count(16)
            .with_merge_strategy(strategy);
        let mut grower = RegionGrower::with_options(&pix, options).unwrap();
        grower.seed(16).unwrap();
        grower.grow();
        let grown = grower.labels().to_vec();
        assert!(grown.iter().all(|&l| l <= 16));

        grower.compute_border_stats();
        grower.merge().unwrap();
        let mapping = grower.region_mapping().to_vec();
        for (after, before) in grower.labels().iter().zip(&grown) {
            assert_eq!(*after, mapping[*before as usize]);
        }
        // surviving ids were all seeded
        let placed = grower.seeds_placed();
        assert!(grower.labels().iter().all(|&l| (1..=placed).contains(&l)));
    }
}

// ============================================================================
// Policies and strategies
// ============================================================================

#[test]
fn test_directional_splits_cells() {
    // region 2 wraps around region 1, so some borders are scanned from 2
    let pix = gray(&[
        &[56, 56, 56, 56],
        &[50, 50, 56, 56],
        &[56, 56, 56, 56],
        &[56, 56, 56, 56],
    ]);
    let run = |policy| {
        let options = GrowerOptions::new().with_border_policy(policy);
        let mut grower = RegionGrower::with_options(&pix, options).unwrap();
        grower.seed(2).unwrap();
        grower.grow();
        let stats = grower.compute_border_stats();
        (
            stats.effectiveness(1, 2),
            stats.effectiveness(2, 1),
            stats.total_events(),
        )
    };
    assert_eq!(run(BorderPolicy::Directional), (3, 2, 5));
    assert_eq!(run(BorderPolicy::Canonical), (5, 0, 5));
}

#[test]
fn test_directional_merge_ignores_reverse_cell() {
    // region 1 is the pair of 50s; region 2 reaches the 58s above it
    // through the 61s, so the similar borders are mostly scanned from 2
    let pix = gray(&[
        &[58, 58, 61, 64],
        &[50, 50, 58, 64],
        &[64, 64, 64, 64],
        &[64, 64, 64, 64],
    ]);
    let run = |policy| {
        let options = GrowerOptions::new().with_border_policy(policy);
        let mut grower = RegionGrower::with_options(&pix, options).unwrap();
        grower.seed(2).unwrap();
        grower.grow();
        grower.compute_border_stats();
        let merged = grower.merge().unwrap();
        (grower.region_mapping().to_vec(), merged, grower.region_count())
    };

    let options = GrowerOptions::new().with_border_policy(BorderPolicy::Directional);
    let mut grower = RegionGrower::with_options(&pix, options).unwrap();
    grower.seed(2).unwrap();
    grower.grow();
    let stats = grower.compute_border_stats();
    assert_eq!((stats.effectiveness(1, 2), stats.similarity(1, 2)), (3, 1.0));
    assert_eq!((stats.effectiveness(2, 1), stats.similarity(2, 1)), (2, 2.0));

    // only [1][2] is consulted: 1 of 3 similar
    assert_eq!(run(BorderPolicy::Directional), (vec![0, 1, 2], 0, 2));
    // folded together: 3 of 5 similar
    assert_eq!(run(BorderPolicy::Canonical), (vec![0, 1, 1], 1, 1));
}

#[test]
fn test_union_find_follows_chains() {
    // region 3 touches both 1 and 2, which do not touch each other
    let pix = gray(&[
        &[100, 100, 110, 120],
        &[100, 100, 110, 120],
        &[110, 110, 110, 120],
        &[110, 110, 110, 110],
    ]);

    let options = GrowerOptions::new().with_seed_count(3);
    let mut single = RegionGrower::with_options(&pix, options.clone()).unwrap();
    let seg = single.segment().unwrap();
    assert_eq!(single.region_mapping(), &[0, 1, 2, 2]);
    assert_eq!(seg.region_count, 2);
    assert_eq!(seg.merged_count, 1);

    let options = options.with_merge_strategy(MergeStrategy::UnionFind);
    let mut union = RegionGrower::with_options(&pix, options).unwrap();
    let seg = union.segment().unwrap();
    assert_eq!(union.region_mapping(), &[0, 1, 1, 1]);
    assert_eq!(seg.region_count, 1);
    assert_eq!(seg.merged_count, 2);
}

// ============================================================================
// Fixture
// ============================================================================

#[test]
fn test_quadrants_segment() {
    let mut rp = RegParams::new("grower_quadrants");
    let pix = load_test_image_gray("quadrants.pgm").unwrap();
    let options = GrowerOptions::new().with_seed_count(4).with_color_seed(2);
    let mut grower = RegionGrower::with_options(&pix, options).unwrap();
    let seg = grower.segment().unwrap();

    rp.compare_values(4.0, seg.region_count as f64, 0.0);
    rp.compare_values(0.0, seg.merged_count as f64, 0.0);
    rp.compare_values(64.0, grower.border_stats().total_events() as f64, 0.0);
    rp.check(
        grower.region_sizes() == vec![0, 256, 256, 256, 256],
        "quadrant sizes",
    );
    rp.compare_values(1.0, seg.labels.get_pixel(0, 0).unwrap() as f64, 0.0);
    rp.compare_values(2.0, seg.labels.get_pixel(31, 0).unwrap() as f64, 0.0);
    rp.compare_values(3.0, seg.labels.get_pixel(0, 31).unwrap() as f64, 0.0);
    rp.compare_values(4.0, seg.labels.get_pixel(31, 31).unwrap() as f64, 0.0);
    assert!(rp.cleanup());
}
