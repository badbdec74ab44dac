use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};
use violet::{AsciiRenderer, ConfigWatcher, Script, Session, Viewport, WorldSummary};
use violet_tiles::TileRegistry;
use violet_world::worldgen::load_config_from_path;
use violet_world::{Preset, World, WorldGenConfig};

#[derive(Parser, Debug)]
#[command(name = "violet")]
#[command(about = "Procedural 2D platformer worlds and a headless physics sandbox")]
struct Cli {
    /// Log to this file as well as the terminal
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a world and print a summary
    Generate {
        #[command(flatten)]
        world: WorldArgs,

        /// Print the world as text
        #[arg(long)]
        ascii: bool,

        /// Text window around the spawn, e.g. "120x40" (default: whole map)
        #[arg(long, value_parser = parse_window)]
        window: Option<(usize, usize)>,

        /// Write a TOML digest of the world to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Run a session headless with scripted input
    Simulate {
        #[command(flatten)]
        world: WorldArgs,

        /// Ticks to run (60 per second of game time)
        #[arg(long, default_value = "600")]
        ticks: u64,

        #[arg(long, value_enum, default_value_t = Script::Walk)]
        script: Script,

        /// Print the view around the player when the run ends
        #[arg(long)]
        ascii: bool,
    },
    /// Regenerate and log a summary every time the config file changes
    Watch {
        #[arg(long)]
        config: PathBuf,

        #[arg(long)]
        tiles: Option<PathBuf>,

        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct WorldArgs {
    /// World seed (random if neither this nor the config sets one)
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(short, long, value_enum)]
    preset: Option<PresetArg>,

    /// Worldgen TOML; missing sections keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tile table TOML replacing the built-in one
    #[arg(long)]
    tiles: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    Full,
    Embedded,
}

impl From<PresetArg> for Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Full => Preset::Full,
            PresetArg::Embedded => Preset::Embedded,
        }
    }
}

fn parse_window(s: &str) -> Result<(usize, usize), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected COLSxROWS, got '{s}'"))?;
    let w: usize = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: usize = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if w == 0 || h == 0 {
        return Err("window must be at least 1x1".to_string());
    }
    Ok((w, h))
}

fn init_logging(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match log_file {
        Some(path) => {
            CombinedLogger::init(vec![
                TermLogger::new(
                    LevelFilter::Info,
                    Config::default(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(LevelFilter::Debug, Config::default(), File::create(path)?),
            ])?;
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
        }
    }
    Ok(())
}

fn load_registry(path: Option<&Path>) -> Result<Arc<TileRegistry>, Box<dyn Error>> {
    let reg = match path {
        Some(p) => {
            log::info!("loading tile table from {}", p.display());
            TileRegistry::load_from_path(p)?
        }
        None => TileRegistry::builtin()?,
    };
    Ok(Arc::new(reg))
}

struct Resolved {
    cfg: WorldGenConfig,
    registry: Arc<TileRegistry>,
    seed: u64,
}

fn resolve(args: &WorldArgs) -> Result<Resolved, Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(p) => load_config_from_path(p)?,
        None => WorldGenConfig::default(),
    };
    if let Some(p) = args.preset {
        cfg.world.preset = p.into();
    }
    let registry = load_registry(args.tiles.as_deref())?;
    let seed = args
        .seed
        .or(cfg.world.seed)
        .unwrap_or_else(rand::random::<u64>);
    log::info!("seed {} preset {:?}", seed, cfg.world.preset);
    Ok(Resolved {
        cfg,
        registry,
        seed,
    })
}

fn run_generate(
    args: &WorldArgs,
    ascii: bool,
    window: Option<(usize, usize)>,
    report: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let r = resolve(args)?;
    let world = World::generate(&r.cfg, r.registry, r.seed);
    print_summary(&world);
    if ascii {
        let map = &world.tilemap;
        let view = match window {
            Some((w, h)) => Viewport::centred_on(world.spawn.feet, w, h, map),
            None => Viewport::whole(map),
        };
        let mut renderer = AsciiRenderer::new();
        print!("{}", renderer.render(map, view, &[(world.spawn.feet, '@')]));
    }
    if let Some(path) = report {
        fs::write(path, WorldSummary::of(&world).to_toml()?)?;
        log::info!("wrote world report to {}", path.display());
    }
    Ok(())
}

fn print_summary(world: &World) {
    let s = WorldSummary::of(world);
    println!("seed {}  {}x{} tiles", s.seed, s.cols, s.rows);
    println!(
        "spawn column {} row {}  chamber column {} floor row {}",
        s.spawn.column, s.spawn.row, s.chamber.column, s.chamber.row
    );
    let biomes: Vec<String> = s.biomes.iter().map(|(b, n)| format!("{b} {n}")).collect();
    println!("biome columns: {}", biomes.join(", "));
    println!(
        "caves {} caverns {} lakes {} tunnels {} islands {} dungeons {}",
        s.stats.caves,
        s.stats.caverns,
        s.stats.lakes,
        s.stats.tunnels,
        s.stats.sky_islands,
        s.stats.dungeons
    );
    println!(
        "trees {} buildings {} chests {} (path {})",
        s.stats.trees,
        s.buildings.len(),
        s.stats.chests,
        s.stats.path_chests
    );
}

fn run_simulate(
    args: &WorldArgs,
    ticks: u64,
    script: Script,
    ascii: bool,
) -> Result<(), Box<dyn Error>> {
    let r = resolve(args)?;
    let mut session = Session::new(r.cfg, r.registry, r.seed);
    let mut events = 0usize;
    for _ in 0..ticks {
        let input = script.input(&session);
        events += session.step(&input).len();
        if session.is_over() {
            log::warn!("player died at tick {}", session.tick());
            break;
        }
    }
    let p = session.player.body.pos;
    log::info!(
        "simulated {} ticks with {:?}: {} events, player at ({:.1},{:.1})",
        session.tick(),
        script,
        events,
        p.x,
        p.y
    );
    println!("{}", session.hud());
    if ascii {
        let mut renderer = AsciiRenderer::new();
        print!("{}", renderer.render_session(&session, 80, 30));
    }
    Ok(())
}

fn run_watch(config: &Path, tiles: Option<&Path>, seed: Option<u64>) -> Result<(), Box<dyn Error>> {
    let registry = load_registry(tiles)?;
    let regenerate = |cfg: &WorldGenConfig| {
        let seed = seed.or(cfg.world.seed).unwrap_or(0);
        let world = World::generate(cfg, Arc::clone(&registry), seed);
        print_summary(&world);
    };
    regenerate(&load_config_from_path(config)?);

    let watcher = ConfigWatcher::new(config)?;
    while let Some(reloaded) = watcher.next_config() {
        match reloaded {
            Ok(cfg) => {
                log::info!("{} changed; regenerating", watcher.path().display());
                regenerate(&cfg);
            }
            Err(e) => log::warn!("ignoring invalid {}: {}", watcher.path().display(), e),
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    match &cli.command {
        Command::Generate {
            world,
            ascii,
            window,
            report,
        } => run_generate(world, *ascii, *window, report.as_deref()),
        Command::Simulate {
            world,
            ticks,
            script,
            ascii,
        } => run_simulate(world, *ticks, *script, *ascii),
        Command::Watch {
            config,
            tiles,
            seed,
        } => run_watch(config, tiles.as_deref(), *seed),
    }
}
