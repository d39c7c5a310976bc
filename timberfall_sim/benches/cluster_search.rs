use criterion::{criterion_group, criterion_main, Criterion, black_box};

use timberfall_sim::actor::Player;
use timberfall_sim::chop::on_block_break;
use timberfall_sim::cluster::find_log_cluster;
use timberfall_sim::config::ChopConfig;
use timberfall_sim::event::{EventQueue, TickScheduler};
use timberfall_sim::leaf_decay::find_decay_leaves;
use timberfall_sim::prng::TickRng;
use timberfall_sim::tree_gen::{self, TreeProfile};
use timberfall_sim::types::{ItemType, Material, ToolStack, VoxelCoord};
use timberfall_sim::world::VoxelWorld;

const BASE: VoxelCoord = VoxelCoord::new(16, 1, 16);

/// A 3x3 trunk 20 logs tall under a wide canopy. The top of the trunk lies
/// past the default log search radius, so the radius bound is exercised too.
fn big_tree() -> (VoxelWorld, Vec<VoxelCoord>) {
    let mut world = VoxelWorld::new(32, 40, 32);
    tree_gen::fill_floor(&mut world, 0, Material::Dirt);
    let mut logs = Vec::new();
    for y in 0..20 {
        for dx in -1..=1 {
            for dz in -1..=1 {
                let c = BASE.offset(dx, y, dz);
                world.set(c, Material::OakLog);
                logs.push(c);
            }
        }
    }
    let canopy = TreeProfile {
        trunk_height: 1,
        canopy_radius: 5,
        leaf_density: 0.8,
        ..TreeProfile::oak()
    };
    let mut rng = TickRng::new(7);
    tree_gen::plant_tree(&mut world, BASE.offset(0, 20, 0), &canopy, &mut rng);
    (world, logs)
}

fn bench_find_log_cluster(c: &mut Criterion) {
    let (world, _) = big_tree();
    let config = ChopConfig::default();

    c.bench_function("find_log_cluster_big_tree", |b| {
        b.iter(|| {
            find_log_cluster(
                black_box(&world),
                BASE,
                Material::OakLog,
                config.max_tree_size,
                config.log_search_radius,
                &config,
            )
        });
    });
}

fn bench_find_decay_leaves(c: &mut Criterion) {
    let (world, logs) = big_tree();
    let config = ChopConfig::default();

    c.bench_function("find_decay_leaves_big_tree", |b| {
        b.iter(|| find_decay_leaves(black_box(&world), black_box(&logs), 7, &config));
    });
}

fn bench_full_fell(c: &mut Criterion) {
    let (world, _) = big_tree();
    let config = ChopConfig::default();

    c.bench_function("on_block_break_big_tree", |b| {
        b.iter(|| {
            let mut world = world.clone();
            let mut player = Player::new("bench").holding(ToolStack::new(ItemType::NetheriteAxe));
            let mut rng = TickRng::new(1);
            let mut queue = EventQueue::new();
            let mut scheduler = TickScheduler::new(&mut queue, 0);
            on_block_break(&mut world, &mut player, &mut rng, &mut scheduler, &config, BASE)
        });
    });
}

criterion_group!(
    benches,
    bench_find_log_cluster,
    bench_find_decay_leaves,
    bench_full_fell,
);
criterion_main!(benches);
