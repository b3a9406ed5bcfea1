//! Command-line adapter driving a designer session

use crate::designer::{Command, Designer, DesignerConfig};
use crate::generators::PatternKind;
use crate::io::configuration::{
    CELL_PIXELS, DEFAULT_OUTPUT_DIR, DEFAULT_SEED, GRID_COLS, GRID_ROWS, MAX_CELL_PIXELS,
    TARGET_COUNT,
};
use crate::io::error::{Result, invalid_input};
use crate::io::image::PngRenderer;
use crate::io::progress::ProgressManager;
use crate::io::report::format_audit;
use crate::palette::Palette;
use crate::store::{JsonDirStorage, MemoryStorage, SANDBOX_ID, Storage};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quiltgrid")]
#[command(
    author,
    version,
    about = "Generate balanced color-grid patterns and export them as PNG swatches"
)]
/// Command-line arguments for a designer session
pub struct Cli {
    /// Directory receiving one PNG per pattern
    #[arg(value_name = "OUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub out_dir: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of grid rows
    #[arg(short, long, default_value_t = GRID_ROWS)]
    pub rows: usize,

    /// Number of grid columns
    #[arg(short, long, default_value_t = GRID_COLS)]
    pub cols: usize,

    /// Required cells per color
    #[arg(short, long, default_value_t = TARGET_COUNT)]
    pub target: usize,

    /// Override a palette display value, e.g. `magenta=#FF00AA`
    #[arg(long = "color", value_name = "NAME=HEX")]
    pub colors: Vec<String>,

    /// Recolor one cell, e.g. `patternA:0:3:lime-green`
    #[arg(short, long = "edit", value_name = "ID:ROW:COL:COLOR")]
    pub edits: Vec<String>,

    /// Save the sandbox under this name after the edits
    #[arg(long, value_name = "NAME")]
    pub save: Option<String>,

    /// Persist patterns as JSON files in this directory
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Reload patterns from the store instead of regenerating them
    #[arg(long, requires = "store")]
    pub resume: bool,

    /// Edge length of one rendered cell in pixels
    #[arg(
        long,
        default_value_t = CELL_PIXELS,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CELL_PIXELS))
    )]
    pub cell_size: u32,

    /// Suppress progress and report output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Designer configuration from the size and seed flags
    pub fn designer_config(&self) -> DesignerConfig {
        DesignerConfig {
            rows: self.rows,
            cols: self.cols,
            target: self.target,
            seed: self.seed,
            ..DesignerConfig::default()
        }
    }

    /// Log level selected by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// Check if progress and reports should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Commands requested on the command line, in execution order
    ///
    /// # Errors
    ///
    /// Returns an error if a color override or cell edit is malformed
    pub fn commands(&self) -> Result<Vec<Command>> {
        let mut commands = Vec::new();
        for arg in &self.colors {
            commands.push(parse_color(arg)?);
        }
        for arg in &self.edits {
            commands.push(parse_edit(arg)?);
        }
        if let Some(name) = &self.save {
            commands.push(Command::SaveSandbox { name: name.clone() });
        }
        Ok(commands)
    }
}

/// Parse a `NAME=HEX` palette override
///
/// # Errors
///
/// Returns `InvalidInput` if the `=` separator is missing
pub fn parse_color(arg: &str) -> Result<Command> {
    let (name, hex) = arg
        .split_once('=')
        .ok_or_else(|| invalid_input("color", &format!("expected NAME=HEX, got '{arg}'")))?;
    Ok(Command::SetColor {
        name: name.trim().to_string(),
        hex: hex.trim().to_string(),
    })
}

/// Parse an `ID:ROW:COL:COLOR` cell edit
///
/// # Errors
///
/// Returns `InvalidInput` if a field is missing or a coordinate is not a
/// number
pub fn parse_edit(arg: &str) -> Result<Command> {
    let malformed = || {
        invalid_input(
            "edit",
            &format!("expected ID:ROW:COL:COLOR, got '{arg}'"),
        )
    };

    let mut fields = arg.splitn(4, ':');
    let pattern_id = fields
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(malformed)?;
    let row = fields
        .next()
        .and_then(|row| row.trim().parse().ok())
        .ok_or_else(malformed)?;
    let col = fields
        .next()
        .and_then(|col| col.trim().parse().ok())
        .ok_or_else(malformed)?;
    let color = fields
        .next()
        .filter(|color| !color.is_empty())
        .ok_or_else(malformed)?;

    Ok(Command::EditCell {
        pattern_id: pattern_id.to_string(),
        row,
        col,
        color: color.to_string(),
    })
}

/// Runs one scripted designer session from CLI arguments
pub struct Session {
    cli: Cli,
}

impl Session {
    /// Create a session for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the designer, apply the requested commands and report
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, generation, a command or PNG export
    /// fails
    pub fn run(&self) -> Result<()> {
        let commands = self.cli.commands()?;

        let storage: Box<dyn Storage> = match &self.cli.store {
            Some(dir) => {
                let storage = JsonDirStorage::open(dir)?;
                log::info!("persisting patterns in {}", storage.dir().display());
                Box::new(storage)
            }
            None => Box::new(MemoryStorage::new()),
        };
        let renderer = PngRenderer::new(&self.cli.out_dir, self.cli.cell_size)?;
        let mut designer = Designer::new(
            self.cli.designer_config(),
            Palette::default(),
            storage,
            Box::new(renderer),
        )?;

        let progress = if self.cli.should_show_progress() {
            ProgressManager::new(commands.len() + 1)
        } else {
            ProgressManager::hidden(commands.len() + 1)
        };

        if self.cli.resume {
            Self::resume(&mut designer)?;
        } else {
            designer.initialize()?;
        }
        progress.step("initialized");

        for command in commands {
            let outcome = designer.execute(command)?;
            log::info!("{outcome:?}");
            progress.step("command");
        }
        progress.finish();

        for failure in designer.take_persistence_failures() {
            log::warn!("pattern not persisted: {failure}");
        }

        if self.cli.should_show_progress() {
            self.print_report(&designer)?;
        }
        Ok(())
    }

    // Missing patterns are regenerated so a partial store still yields a full set
    fn resume(designer: &mut Designer) -> Result<()> {
        let mut restored = 0;
        for kind in PatternKind::ALL {
            if designer.restore(kind.id())? {
                restored += 1;
            } else {
                designer.regenerate(kind)?;
            }
        }
        if designer.restore(SANDBOX_ID)? {
            restored += 1;
        } else {
            designer.shuffle_sandbox()?;
        }
        restored += designer.restore_saved()?;
        log::info!("restored {restored} patterns from storage");
        Ok(())
    }

    #[allow(clippy::print_stdout)]
    fn print_report(&self, designer: &Designer) -> Result<()> {
        for id in designer.store().ids() {
            let counts = designer.audit(id)?;
            let title = designer
                .store()
                .get(id)
                .and_then(|pattern| pattern.name.as_deref())
                .map_or_else(|| id.to_string(), |name| format!("{name} ({id})"));
            print!("{}", format_audit(&title, &counts, designer.palette()));
        }
        println!("Patterns written to {}", self.cli.out_dir.display());
        Ok(())
    }
}
