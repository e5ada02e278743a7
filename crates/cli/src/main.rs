// spangrid CLI - headless merge-grid operations over wire-format JSON files

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use spangrid_engine::cell::{Alignment, VerticalAlignment};
use spangrid_engine::error::GridError;
use spangrid_engine::grid::Grid;
use spangrid_engine::ops;
use spangrid_engine::selection::{Range, Selection};
use spangrid_io::{encode, export, import, DecodeMode};

use exit_codes::{EXIT_IO_ERROR, EXIT_OP_ERROR, EXIT_PARSE_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "spangrid")]
#[command(about = "Edit and inspect mergeable grids (headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a fresh grid of unit cells
    New {
        #[arg(long)]
        rows: usize,
        #[arg(long)]
        cols: usize,
        /// Output file (stdout if omitted)
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Print the grid structure as text
    Show {
        file: PathBuf,
        /// Fail on inconsistent merge tags instead of repairing them
        #[arg(long)]
        strict: bool,
    },

    /// Merge a rectangular selection into one region
    #[command(after_help = "\
Ranges are zero-based, inclusive: --range 0,0:1,1 merges the top-left 2x2 block.")]
    Merge {
        file: PathBuf,
        /// Selection rectangle as r1,c1:r2,c2
        #[arg(long)]
        range: String,
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
        #[arg(long)]
        strict: bool,
    },

    /// Split a merged region back into unit cells
    Split {
        file: PathBuf,
        /// Master coordinate as r,c
        #[arg(long)]
        at: String,
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
        #[arg(long)]
        strict: bool,
    },

    /// Crop the grid to a rectangle, re-basing it to (0,0)
    Crop {
        file: PathBuf,
        /// Crop rectangle as r1,c1:r2,c2
        #[arg(long)]
        range: String,
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
        #[arg(long)]
        strict: bool,
    },

    /// Set cell alignment over a rectangle
    Align {
        file: PathBuf,
        /// Target rectangle as r1,c1:r2,c2 (or a single r,c)
        #[arg(long)]
        range: String,
        #[arg(long, value_enum)]
        horizontal: Option<AlignArg>,
        #[arg(long, value_enum)]
        vertical: Option<VerticalAlignArg>,
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
        #[arg(long)]
        strict: bool,
    },

    /// Set a cell's content
    Set {
        file: PathBuf,
        /// Cell coordinate as r,c
        #[arg(long)]
        at: String,
        #[arg(long)]
        content: String,
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlignArg {
    Left,
    Center,
    Right,
}

impl From<AlignArg> for Alignment {
    fn from(a: AlignArg) -> Self {
        match a {
            AlignArg::Left => Alignment::Left,
            AlignArg::Center => Alignment::Center,
            AlignArg::Right => Alignment::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VerticalAlignArg {
    Top,
    Middle,
    Bottom,
}

impl From<VerticalAlignArg> for VerticalAlignment {
    fn from(a: VerticalAlignArg) -> Self {
        match a {
            VerticalAlignArg::Top => VerticalAlignment::Top,
            VerticalAlignArg::Middle => VerticalAlignment::Middle,
            VerticalAlignArg::Bottom => VerticalAlignment::Bottom,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::New { rows, cols, out } => cmd_new(rows, cols, out),
        Commands::Show { file, strict } => cmd_show(&file, strict),
        Commands::Merge { file, range, out, strict } => {
            cmd_edit(&file, out, strict, |grid| {
                let range = parse_range(&range)?;
                run_op(ops::merge(grid, &Selection::from_range(range)))
            })
        }
        Commands::Split { file, at, out, strict } => {
            cmd_edit(&file, out, strict, |grid| {
                let (row, col) = parse_coord(&at)?;
                run_op(ops::split(grid, &Selection::single(row, col)))
            })
        }
        Commands::Crop { file, range, out, strict } => {
            cmd_edit(&file, out, strict, |grid| {
                let range = parse_range(&range)?;
                run_op(ops::crop_to_selection(grid, &Selection::from_range(range)))
            })
        }
        Commands::Align { file, range, horizontal, vertical, out, strict } => {
            cmd_edit(&file, out, strict, |grid| {
                let range = parse_range(&range)?;
                run_op(ops::set_alignment(
                    grid,
                    &Selection::from_range(range),
                    horizontal.map(Into::into),
                    vertical.map(Into::into),
                ))
            })
        }
        Commands::Set { file, at, content, out, strict } => {
            cmd_edit(&file, out, strict, |grid| {
                let (row, col) = parse_coord(&at)?;
                run_op(ops::set_content(grid, row, col, &content))
            })
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO_ERROR, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE_ERROR, message: msg.into(), hint: None }
    }

    /// Create error from a rejected grid operation, with a hint where the
    /// fix is not obvious from the message alone.
    pub fn op(err: GridError) -> Self {
        let hint = match &err {
            GridError::NonRectangularSelection => {
                Some("merged regions cannot be partially selected; widen the range".to_string())
            }
            GridError::HiddenSlot { .. } => {
                Some("address the top-left (master) cell of the merged region".to_string())
            }
            GridError::MalformedInput(_) => {
                Some("re-run without --strict to repair inconsistent records".to_string())
            }
            _ => None,
        };
        Self { code: EXIT_OP_ERROR, message: err.to_string(), hint }
    }
}

fn run_op(result: Result<Grid, GridError>) -> Result<Grid, CliError> {
    result.map_err(CliError::op)
}

fn decode_mode(strict: bool) -> DecodeMode {
    if strict {
        DecodeMode::Strict
    } else {
        DecodeMode::Lenient
    }
}

fn load(path: &Path, strict: bool) -> Result<Grid, CliError> {
    import(path, decode_mode(strict))
        .map_err(|e| CliError::parse(format!("{}: {}", path.display(), e)))
}

fn save(grid: &Grid, path: &Path) -> Result<(), CliError> {
    export(grid, path).map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))
}

/// Load, transform, write back (in place unless -o is given).
fn cmd_edit(
    file: &Path,
    out: Option<PathBuf>,
    strict: bool,
    op: impl FnOnce(&Grid) -> Result<Grid, CliError>,
) -> Result<(), CliError> {
    let grid = load(file, strict)?;
    let next = op(&grid)?;
    save(&next, out.as_deref().unwrap_or(file))
}

fn cmd_new(rows: usize, cols: usize, out: Option<PathBuf>) -> Result<(), CliError> {
    if rows == 0 || cols == 0 {
        return Err(CliError::usage("rows and cols must be at least 1"));
    }
    let grid = Grid::new(rows, cols);
    match out {
        Some(path) => save(&grid, &path),
        None => {
            let json = serde_json::to_string_pretty(&encode(&grid))
                .map_err(|e| CliError::io(e.to_string()))?;
            println!("{}", json);
            Ok(())
        }
    }
}

fn cmd_show(file: &Path, strict: bool) -> Result<(), CliError> {
    let grid = load(file, strict)?;
    println!("{} x {}", grid.rows(), grid.cols());
    for r in 0..grid.rows() {
        let mut line = String::new();
        for c in 0..grid.cols() {
            let text = match grid.get(r, c).map_err(CliError::op)? {
                Some(cell) if cell.is_span() => {
                    format!("{} ({}x{})", cell.content, cell.row_span, cell.col_span)
                }
                Some(cell) => cell.content.clone(),
                None => "·".to_string(),
            };
            line.push_str(&format!("{:<16}", text));
        }
        println!("{}", line.trim_end());
    }
    Ok(())
}

/// Parse a zero-based "r,c" coordinate.
fn parse_coord(input: &str) -> Result<(usize, usize), CliError> {
    let (r, c) = input
        .split_once(',')
        .ok_or_else(|| CliError::usage(format!("expected r,c — got '{input}'")))?;
    let row = r
        .trim()
        .parse()
        .map_err(|_| CliError::usage(format!("bad row in '{input}'")))?;
    let col = c
        .trim()
        .parse()
        .map_err(|_| CliError::usage(format!("bad column in '{input}'")))?;
    Ok((row, col))
}

/// Parse "r1,c1:r2,c2" (or a bare "r,c" as a single-cell range).
fn parse_range(input: &str) -> Result<Range, CliError> {
    match input.split_once(':') {
        Some((a, b)) => {
            let (r1, c1) = parse_coord(a)?;
            let (r2, c2) = parse_coord(b)?;
            Ok(Range::new(r1, c1, r2, c2))
        }
        None => {
            let (row, col) = parse_coord(input)?;
            Ok(Range::single(row, col))
        }
    }
}
