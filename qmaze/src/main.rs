use qmaze::{
    app::{self, AppError},
    logging,
    settings::Settings,
};

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "qmaze")]
struct Args {
    #[clap(help = "Maze file (.txt, .maze, .json, .json5 or .toml), built-in maze when missing")]
    maze: Option<String>,
    #[clap(long, help = "Path selector: amplified, most_probable, shortest or first")]
    selector: Option<String>,
    #[clap(long, help = "Number of measurements of the amplified register")]
    shots: Option<usize>,
    #[clap(long, help = "Seed for the measurements")]
    seed: Option<u64>,
    #[clap(long, help = "Largest register to simulate")]
    max_qubits: Option<usize>,
    #[clap(long, help = "Stop enumerating after this many paths")]
    max_paths: Option<usize>,
    #[clap(long, help = "Skip paths longer than this many steps")]
    cutoff: Option<usize>,
    #[clap(long, action, help = "Disable colored output")]
    no_color: bool,
    #[clap(short, long, action = ArgAction::Count, help = "Log more, can be repeated")]
    verbose: u8,
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(short, long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
}

impl Args {
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(selector) = &self.selector {
            settings = settings.set_selector(selector.as_str());
        }
        if let Some(shots) = self.shots {
            settings = settings.set_shots(shots);
        }
        if let Some(seed) = self.seed {
            settings = settings.set_seed(seed);
        }
        if let Some(max_qubits) = self.max_qubits {
            settings = settings.set_max_qubits(max_qubits);
        }
        if let Some(max_paths) = self.max_paths {
            settings = settings.set_max_paths(max_paths);
        }
        if let Some(cutoff) = self.cutoff {
            settings = settings.set_cutoff(cutoff);
        }
        if self.no_color {
            settings = settings.set_color(false);
        }
        settings
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if args.reset_config {
        Settings::reset_config(Settings::default_path())?;
        return Ok(());
    }

    if args.show_config_path {
        let settings_path = Settings::default_path();
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    if args.debug_config {
        println!("{:#?}", Settings::load(Settings::default_path()));
        return Ok(());
    }

    better_panic::install();
    logging::init(args.verbose, !args.no_color)?;

    let settings = args.apply(Settings::load_or_default(Settings::default_path()));
    logging::get_logger().set_color(settings.get_color());
    log::debug!("Running with {:?}", settings);

    let loaded = app::load_maze(args.maze.as_deref())?;
    app::run(&mut std::io::stdout().lock(), loaded, &settings)?;

    Ok(())
}
