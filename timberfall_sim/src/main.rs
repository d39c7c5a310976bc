// CLI entry point: plant a tree, chop it down, print what happened.
//
// Builds a small world with a dirt floor, plants one tree from a preset,
// gives a player the requested tool and breaks the base log. The sim is then
// stepped past the leaf-decay deferral so the weakening shows up too.
//
// Usage:
//   chop [OPTIONS]
//     --config <PATH>       JSON config (default: built-in defaults)
//     --seed <N>            PRNG seed (default: 1)
//     --tree <KIND>         oak | birch | spruce (default: oak)
//     --tool <ITEM>         wooden_axe .. netherite_axe, shears, stick, none
//                           (default: iron_axe)
//     --unbreaking <N>      Unbreaking level of the tool (default: 0)
//     --json                Print events as JSON

use timberfall_sim::actor::Player;
use timberfall_sim::command::{SimAction, SimCommand};
use timberfall_sim::config::ChopConfig;
use timberfall_sim::event::{SimEvent, SimEventKind};
use timberfall_sim::logging;
use timberfall_sim::prng::TickRng;
use timberfall_sim::sim::ChopSim;
use timberfall_sim::tree_gen::{self, TreeProfile};
use timberfall_sim::types::{ItemType, Material, ToolStack, VoxelCoord};
use timberfall_sim::world::VoxelWorld;

struct CliArgs {
    config_path: Option<String>,
    seed: u64,
    tree: TreeProfile,
    tool: Option<ItemType>,
    unbreaking: u32,
    json: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            config_path: None,
            seed: 1,
            tree: TreeProfile::oak(),
            tool: Some(ItemType::IronAxe),
            unbreaking: 0,
            json: false,
        }
    }
}

const WORLD_SIZE: (u32, u32, u32) = (24, 32, 24);
const BREAK_TICK: u64 = 1;

fn main() {
    logging::init();
    let args = parse_args();

    let config = match &args.config_path {
        Some(path) => match ChopConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {path}: {e}");
                std::process::exit(1);
            }
        },
        None => ChopConfig::default(),
    };

    let (sx, sy, sz) = WORLD_SIZE;
    let mut world = VoxelWorld::new(sx, sy, sz);
    tree_gen::fill_floor(&mut world, 0, Material::Dirt);
    let base = VoxelCoord::new(sx as i32 / 2, 1, sz as i32 / 2);
    let mut plant_rng = TickRng::new(args.seed);
    let planted = tree_gen::plant_tree(&mut world, base, &args.tree, &mut plant_rng);
    log::info!(
        "Planted {:?} tree at {base}: {} logs, {} leaves",
        args.tree.log,
        planted.log_voxels.len(),
        planted.leaf_voxels.len()
    );

    let delay = config.leaf_decay_delay_ticks;
    let mut sim = ChopSim::new(args.seed, config, world);
    let mut player = Player::new("lumberjack");
    player.held = args
        .tool
        .map(|item| ToolStack::new(item).with_unbreaking(args.unbreaking));
    let player_id = sim.add_player(player);

    let commands = [SimCommand {
        player_id,
        tick: BREAK_TICK,
        action: SimAction::BreakBlock { position: base },
    }];
    let result = sim.step(&commands, BREAK_TICK + delay);

    if args.json {
        match serde_json::to_string_pretty(&result.events) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize events: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    for event in &result.events {
        println!("{}", describe(event));
    }
    println!(
        "{} logs and {} leaves left standing",
        sim.world.count(args.tree.log),
        sim.world.count(args.tree.leaves)
    );
    match sim.player(player_id).and_then(|p| p.held) {
        Some(tool) => println!(
            "{:?}: {}/{} durability used",
            tool.item,
            tool.damage,
            tool.max_durability()
        ),
        None => println!("Hand is empty"),
    }
}

fn describe(event: &SimEvent) -> String {
    let body = match &event.kind {
        SimEventKind::BlockBroken {
            position, material, ..
        } => format!("broke {material:?} at {position}"),
        SimEventKind::TreeFelled {
            position,
            material,
            broken_count,
            left_standing,
            leaves_scheduled,
            ..
        } => format!(
            "felled {material:?} tree at {position}: {broken_count} logs broken, \
             {left_standing} left standing, {leaves_scheduled} leaves scheduled"
        ),
        SimEventKind::ChopSkipped {
            position, reason, ..
        } => format!("did not fell at {position}: {reason:?}"),
        SimEventKind::ToolBroke { item, .. } => format!("{item:?} broke"),
        SimEventKind::LeavesWeakened { count } => format!("{count} leaves set to decay"),
    };
    format!("[tick {}] {body}", event.tick)
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching.
fn parse_args() -> CliArgs {
    let mut cli = CliArgs::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                cli.config_path = args.get(i).cloned().or_else(|| {
                    eprintln!("--config requires a path");
                    std::process::exit(1);
                });
            }
            "--seed" => {
                i += 1;
                cli.seed = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--seed requires a valid number");
                    std::process::exit(1);
                });
            }
            "--tree" => {
                i += 1;
                cli.tree = args
                    .get(i)
                    .and_then(|s| TreeProfile::preset(s))
                    .unwrap_or_else(|| {
                        eprintln!("--tree requires one of: oak, birch, spruce");
                        std::process::exit(1);
                    });
            }
            "--tool" => {
                i += 1;
                cli.tool = match args.get(i).map(String::as_str) {
                    Some("none") => None,
                    Some(name) => Some(ItemType::from_name(name).unwrap_or_else(|| {
                        eprintln!("Unknown tool: {name}");
                        std::process::exit(1);
                    })),
                    None => {
                        eprintln!("--tool requires an item name");
                        std::process::exit(1);
                    }
                };
            }
            "--unbreaking" => {
                i += 1;
                cli.unbreaking = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--unbreaking requires a valid number");
                    std::process::exit(1);
                });
            }
            "--json" => cli.json = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn print_usage() {
    println!("Usage: chop [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <PATH>       JSON config (default: built-in defaults)");
    println!("  --seed <N>            PRNG seed (default: 1)");
    println!("  --tree <KIND>         oak | birch | spruce (default: oak)");
    println!("  --tool <ITEM>         wooden_axe, stone_axe, iron_axe, golden_axe,");
    println!("                        diamond_axe, netherite_axe, shears, stick, none");
    println!("                        (default: iron_axe)");
    println!("  --unbreaking <N>      Unbreaking level of the tool (default: 0)");
    println!("  --json                Print events as JSON");
    println!("  --help, -h            Show this help");
}
