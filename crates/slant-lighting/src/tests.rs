use super::*;
use slant_blocks::config::{BlockDef, BlocksConfig};
use slant_world::{WorldGenConfig, WorldGenMode, generate_world};

const STONE: Block = Block { id: 1, state: 0 };
const GLASS: Block = Block { id: 2, state: 0 };

fn make_test_registry() -> BlockRegistry {
    let blocks = vec![
        BlockDef { solid: Some(false), ..BlockDef::named("air") },
        BlockDef::named("stone"),
        BlockDef { blocks_light: Some(false), ..BlockDef::named("glass") },
        BlockDef::named("dirt"),
        BlockDef::named("grass"),
    ];
    BlockRegistry::from_configs(BlocksConfig { blocks, unknown_block: None }).unwrap()
}

fn world_with(w: usize, h: usize, l: usize, solids: &[(i32, i32, i32)]) -> WorldGrid {
    let mut g = WorldGrid::new(w, h, l).unwrap();
    for &(x, y, z) in solids {
        g.set_block(x, y, z, STONE).unwrap();
    }
    g
}

fn loaded(grid: &WorldGrid, reg: &BlockRegistry) -> AngledLighting {
    let mut al = AngledLighting::new();
    al.on_world_loaded(grid, reg);
    al
}

fn depth_at(al: &AngledLighting, u: usize, v: usize) -> i32 {
    al.depths().unwrap().get(u, v)
}

#[test]
fn single_block_sets_its_column_depth() {
    let reg = make_test_registry();
    let grid = world_with(3, 3, 3, &[(1, 1, 1)]);
    let al = loaded(&grid, &reg);
    let d = al.depths().unwrap();
    assert_eq!(d.skew(1, 1, 1), (3, 3));
    assert_eq!(depth_at(&al, 3, 3), 1);
    // The ray one step up the diagonal stops early on its lookahead.
    assert_eq!(depth_at(&al, 2, 2), 2);
    assert_eq!(d.cells().iter().filter(|&&c| c != 0).count(), 2);

    assert!(al.is_lit(1, 1, 1));
    assert!(al.is_lit(1, 2, 1));
    assert!(!al.is_lit(0, 0, 0));
    assert!(!al.is_lit(0, 1, 0));
    assert!(al.is_lit(2, 0, 2));
}

#[test]
fn empty_world_is_lit_everywhere() {
    let reg = make_test_registry();
    let grid = world_with(5, 6, 4, &[]);
    let al = loaded(&grid, &reg);
    assert!(al.depths().unwrap().cells().iter().all(|&c| c == 0));
    for y in 0..6 {
        for z in 0..4 {
            for x in 0..5 {
                assert!(al.is_lit(x, y, z));
            }
        }
    }
}

#[test]
fn out_of_bounds_is_lit() {
    let reg = make_test_registry();
    let mut grid = WorldGrid::new(3, 3, 3).unwrap();
    grid.fill_box((0, 0, 0), (3, 3, 3), STONE);
    let al = loaded(&grid, &reg);
    assert!(!al.is_lit(1, 1, 1));
    for (x, y, z) in [(-1, 0, 0), (0, -1, 0), (0, 0, -1), (3, 0, 0), (0, 3, 0), (0, 0, 3)] {
        assert!(al.is_lit(x, y, z), "({}, {}, {})", x, y, z);
    }
}

#[test]
fn both_quorum_corners_stop_the_ray() {
    let reg = make_test_registry();
    // Cell (7, 7) marches (6,9,6) -> (5,8,5) -> (4,7,4) ...
    let upper = world_with(8, 10, 8, &[(4, 8, 5), (5, 8, 4)]);
    let al = loaded(&upper, &reg);
    assert_eq!(depth_at(&al, 7, 7), 8);
    assert!(!al.is_lit(4, 7, 4));

    let lower = world_with(8, 10, 8, &[(4, 7, 5), (5, 7, 4)]);
    assert_eq!(depth_at(&loaded(&lower, &reg), 7, 7), 8);
}

#[test]
fn one_quorum_corner_lets_the_ray_through() {
    let reg = make_test_registry();
    for corner in [(4, 8, 5), (5, 8, 4), (4, 7, 5)] {
        let grid = world_with(8, 10, 8, &[corner]);
        let al = loaded(&grid, &reg);
        assert_eq!(depth_at(&al, 7, 7), 0, "corner {:?}", corner);
        assert!(al.is_lit(4, 7, 4));
    }
}

#[test]
fn lookahead_stops_one_above_the_blocker() {
    let reg = make_test_registry();
    let grid = world_with(8, 10, 8, &[(5, 7, 5)]);
    assert_eq!(depth_at(&loaded(&grid, &reg), 7, 7), 8);
}

#[test]
fn transparent_blocks_do_not_cast_shadow() {
    let reg = make_test_registry();
    let mut grid = WorldGrid::new(6, 6, 6).unwrap();
    grid.fill_box((0, 3, 0), (6, 4, 6), GLASS);
    let al = loaded(&grid, &reg);
    assert!(al.depths().unwrap().cells().iter().all(|&c| c == 0));
    assert!(al.is_lit(2, 0, 2));
}

#[test]
fn top_face_samples_the_voxel_above() {
    let reg = make_test_registry();
    let grid = world_with(8, 10, 8, &[(4, 8, 4)]);
    let al = loaded(&grid, &reg);
    assert_eq!(depth_at(&al, 6, 6), 8);
    assert!(!al.is_lit(2, 6, 2));
    assert!(al.is_lit(2, 5, 2));

    let p = *al.palette();
    assert_eq!(al.top_color(2, 5, 2), p.shadow_z_side);
    assert_eq!(al.color(2, 5, 2), p.outside);
    assert_eq!(al.face_color(Face::Top, 2, 4, 2), p.outside);
}

#[test]
fn top_face_at_coordinate_limit_is_lit() {
    let reg = make_test_registry();
    let al = loaded(&world_with(4, 4, 4, &[(1, 1, 1)]), &reg);
    let p = *al.palette();
    assert_eq!(al.top_color(0, i32::MAX, 0), p.outside);
    assert_eq!(al.face_color(Face::Top, i32::MAX, i32::MAX, i32::MAX), p.outside);
}

#[test]
fn face_accessors_use_their_palette_pairs() {
    let reg = make_test_registry();
    let grid = world_with(8, 10, 8, &[(4, 8, 4)]);
    let al = loaded(&grid, &reg);
    let p = *al.palette();
    // (2, 6, 2) is shadowed; (2, 8, 2) and the voxel above it are lit.
    let (sx, sy, sz) = (2, 6, 2);
    assert_eq!(al.color(sx, sy, sz), p.shadow_z_side);
    assert_eq!(al.sprite_color(sx, sy, sz), p.shadow);
    assert_eq!(al.bottom_color(sx, sy, sz), p.shadow_y_bottom);
    assert_eq!(al.x_side_color(sx, sy, sz), p.shadow_x_side);
    assert_eq!(al.z_side_color(sx, sy, sz), p.shadow_x_side);

    let (lx, ly, lz) = (2, 8, 2);
    assert!(al.is_lit(lx, ly, lz) && al.is_lit(lx, ly + 1, lz));
    assert_eq!(al.color(lx, ly, lz), p.outside);
    assert_eq!(al.sprite_color(lx, ly, lz), p.outside);
    assert_eq!(al.top_color(lx, ly, lz), p.outside);
    assert_eq!(al.bottom_color(lx, ly, lz), p.outside_y_bottom);
    assert_eq!(al.x_side_color(lx, ly, lz), p.outside_x_side);
    assert_eq!(al.z_side_color(lx, ly, lz), p.outside_z_side);

    for face in Face::ALL {
        assert_eq!(al.face_color(face, lx, ly, lz), p.pair(face).0);
    }
}

#[test]
fn default_palette_values() {
    let p = LightPalette::default();
    assert_eq!(p.outside, PackedColor(0xFFFF_FFFF));
    assert_eq!(p.shadow, PackedColor(0xFF9B_9B9B));
    assert_eq!(p.shadow_x_side, Color::rgb(93, 93, 93).pack());
    assert_eq!(p.shadow_z_side, Color::rgb(124, 124, 124).pack());
    assert_eq!(p.shadow_y_bottom, Color::rgb(77, 77, 77).pack());
    assert_eq!(p.outside_x_side, Color::rgb(153, 153, 153).pack());
}

#[test]
fn full_recompute_is_idempotent() {
    let reg = make_test_registry();
    let cfg = WorldGenConfig {
        width: 24,
        height: 16,
        length: 20,
        mode: WorldGenMode::Normal,
        pillar_chance: 0.05,
        ..Default::default()
    };
    let grid = generate_world(&cfg, &reg).unwrap();
    let mut al = loaded(&grid, &reg);
    let before = al.depths().unwrap().clone();
    assert_eq!(al.compute_depths(&grid, &reg, 0, 0, 24, 20), 0);
    assert_eq!(al.depths().unwrap(), &before);
}

#[test]
fn exiting_rays_keep_the_previous_depth() {
    let reg = make_test_registry();
    let mut grid = world_with(8, 10, 8, &[(4, 8, 4)]);
    let mut al = loaded(&grid, &reg);
    assert_eq!(depth_at(&al, 6, 6), 8);

    grid.set_block(4, 8, 4, Block::AIR);
    al.compute_depths(&grid, &reg, 0, 0, 8, 8);
    assert_eq!(depth_at(&al, 6, 6), 8);
    assert_eq!(depth_at(&loaded(&grid, &reg), 6, 6), 0);
}

#[test]
fn zero_extent_is_a_noop() {
    let reg = make_test_registry();
    let mut grid = world_with(8, 10, 8, &[]);
    let mut al = loaded(&grid, &reg);
    grid.set_block(4, 8, 4, STONE);
    assert_eq!(al.compute_depths(&grid, &reg, 0, 0, 0, 8), 0);
    assert_eq!(al.compute_depths(&grid, &reg, 0, 0, 8, 0), 0);
    assert!(al.depths().unwrap().cells().iter().all(|&c| c == 0));
}

#[test]
fn partial_region_touches_only_its_cells() {
    let reg = make_test_registry();
    let mut grid = world_with(8, 10, 8, &[]);
    let mut al = loaded(&grid, &reg);
    grid.set_block(4, 8, 4, STONE);
    // Start shifted by height lands on skewed cell (6, 6).
    assert_eq!(al.compute_depths(&grid, &reg, -4, -4, 1, 1), 1);
    assert_eq!(depth_at(&al, 6, 6), 8);
    // (5, 5) also reads the new block but lies outside the region.
    assert_eq!(depth_at(&al, 5, 5), 0);
    al.compute_depths(&grid, &reg, 0, 0, 8, 8);
    assert_eq!(depth_at(&al, 5, 5), 9);
}

#[test]
fn block_edit_matches_full_recompute() {
    let reg = make_test_registry();
    let mut grid = world_with(8, 10, 8, &[(2, 3, 2)]);
    let mut al = loaded(&grid, &reg);
    let mut full = loaded(&grid, &reg);

    let old = grid.set_block(4, 8, 4, STONE).unwrap();
    let changed = al.notify_block_changed(&grid, &reg, 4, 8, 4, old, STONE);
    full.compute_depths(&grid, &reg, 0, 0, 8, 8);
    assert_eq!(al.depths(), full.depths());
    assert!(changed.contains(&(6, 6)));
    assert!(changed.contains(&(5, 5)));

    // Same light-blocking class: nothing to do.
    let old = grid.set_block(4, 8, 4, Block { id: 3, state: 0 }).unwrap();
    assert!(al.notify_block_changed(&grid, &reg, 4, 8, 4, old, Block { id: 3, state: 0 }).is_empty());
    assert!(al.notify_block_changed(&grid, &reg, 9, 0, 0, Block::AIR, STONE).is_empty());
}

#[test]
fn palette_changes_leave_depths_alone() {
    let reg = make_test_registry();
    let grid = world_with(8, 10, 8, &[(4, 8, 4)]);
    let mut al = loaded(&grid, &reg);
    let before = al.depths().unwrap().clone();
    let red = Color::rgb(200, 10, 10);
    al.set_sun_color(red);
    al.set_shadow_color(Color::rgb(40, 40, 90));
    assert_eq!(al.palette().outside, red.pack());
    assert_eq!(al.palette().outside_x_side, Color::rgb(120, 6, 6).pack());
    assert_eq!(al.palette().shadow_y_bottom, Color::rgb(20, 20, 45).pack());
    assert_eq!(al.depths().unwrap(), &before);
    assert!(!al.is_lit(2, 6, 2));
}

#[test]
fn env_changes_apply_on_poll() {
    let mut env = WorldEnv::new();
    let mut al = AngledLighting::new();
    al.init(&mut env);
    assert_eq!(env.subscriber_count(), 1);

    let warm = Color::rgb(255, 220, 180);
    assert!(env.set_sunlight(warm));
    assert!(!env.set_sunlight(warm));
    assert_eq!(al.palette().outside, DEFAULT_SUNLIGHT.pack());
    assert_eq!(al.poll_env(), 1);
    assert_eq!(al.palette().outside, warm.pack());
    assert_eq!(al.poll_env(), 0);

    env.reset_colors();
    al.poll_env();
    assert_eq!(*al.palette(), LightPalette::default());

    al.dispose();
    env.set_shadowlight(Color::BLACK);
    assert_eq!(env.subscriber_count(), 0);
    assert_eq!(al.poll_env(), 0);
}

#[test]
fn init_takes_current_env_colors() {
    let mut env = WorldEnv::with_colors(Color::rgb(250, 240, 200), Color::rgb(60, 60, 80));
    let mut al = AngledLighting::new();
    al.init(&mut env);
    assert_eq!(al.palette().outside, Color::rgb(250, 240, 200).pack());
    assert_eq!(al.palette().shadow, Color::rgb(60, 60, 80).pack());

    al.on_new_map();
    assert_eq!(*al.palette(), LightPalette::default());
}

#[test]
fn light_height_is_unsupported() {
    let reg = make_test_registry();
    let grid = world_with(4, 4, 4, &[(1, 0, 1)]);
    let al = loaded(&grid, &reg);
    assert_eq!(al.light_height(1, 1), None);
    assert_eq!(al.light_height(-1, 9), None);
}

#[test]
fn unload_releases_arrays() {
    let reg = make_test_registry();
    let grid = world_with(4, 4, 4, &[]);
    let mut al = loaded(&grid, &reg);
    assert!(al.is_loaded());
    al.on_world_unloaded();
    assert!(!al.is_loaded());
    assert!(al.notify_block_changed(&grid, &reg, 0, 0, 0, Block::AIR, STONE).is_empty());
}

#[test]
#[should_panic(expected = "before a world was loaded")]
fn query_before_load_panics() {
    AngledLighting::new().is_lit(0, 0, 0);
}

#[test]
#[should_panic(expected = "dimensions differ")]
fn grid_dimension_mismatch_panics() {
    let reg = make_test_registry();
    let mut al = loaded(&world_with(4, 4, 4, &[]), &reg);
    al.compute_depths(&world_with(5, 4, 4, &[]), &reg, 0, 0, 5, 4);
}
