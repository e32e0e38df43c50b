use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use splinegen::config::{
    BLOCK_SIZE_STEP_MAX, BLUR_AMOUNT_MAX, CONSTANT_STEP_MAX, KERNEL_SIZE_MAX,
};
use splinegen::{ChainApproximation, PreprocessParams, SliderSettings};

/// Command line interface definition.
#[derive(Parser, Debug)]
#[command(author, version, about, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report how many contours are detected and the largest area
    Detect(DetectCommand),
    /// Export the thresholded binary mask as a PNG
    Mask(MaskCommand),
    /// Export the largest contour as spline points in CSV
    Export(ExportCommand),
}

#[derive(Args, Debug)]
pub struct DetectCommand {
    /// Input image path
    pub input: PathBuf,
    #[command(flatten)]
    pub preprocess: PreprocessArgs,
}

#[derive(Args, Debug)]
pub struct MaskCommand {
    /// Input image path
    pub input: PathBuf,
    /// Output path (defaults to `<name>-mask.png`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub preprocess: PreprocessArgs,
}

#[derive(Args, Debug)]
pub struct ExportCommand {
    /// Input image path
    pub input: PathBuf,
    /// Output CSV path (defaults to `<name>-spline.csv`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Decimal places written for X, Y and Z
    #[arg(long, env = "SPLINEGEN_PRECISION", default_value_t = 1)]
    pub precision: usize,
    #[command(flatten)]
    pub preprocess: PreprocessArgs,
}

#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// Invert intensities before thresholding
    #[arg(long)]
    pub invert: bool,
    /// Enable gaussian blur before thresholding
    #[arg(long)]
    pub blur: bool,
    /// Blur kernel size (even values are rounded up to odd)
    #[arg(
        long = "blur-amount",
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(0..=i64::from(BLUR_AMOUNT_MAX))
    )]
    pub blur_amount: u8,
    /// Block size slider position; block size is 11 + 2 * step
    #[arg(
        long = "block-step",
        default_value_t = 0,
        conflicts_with = "block_size",
        value_parser = clap::value_parser!(u8).range(0..=i64::from(BLOCK_SIZE_STEP_MAX))
    )]
    pub block_step: u8,
    /// Explicit adaptive block size (odd, 3 to 1023)
    #[arg(long = "block-size", value_parser = parse_block_size)]
    pub block_size: Option<u32>,
    /// Constant slider position; constant is step - 10
    #[arg(
        long = "constant-step",
        default_value_t = 10,
        conflicts_with = "constant",
        value_parser = clap::value_parser!(u8).range(0..=i64::from(CONSTANT_STEP_MAX))
    )]
    pub constant_step: u8,
    /// Explicit constant subtracted from the local mean
    #[arg(long, allow_hyphen_values = true)]
    pub constant: Option<i32>,
    /// How traced boundaries are stored
    #[arg(long, value_enum, default_value_t = ChainArg::Simple)]
    pub chain: ChainArg,
}

impl From<&PreprocessArgs> for PreprocessParams {
    fn from(args: &PreprocessArgs) -> Self {
        let sliders = SliderSettings {
            invert: args.invert,
            blur: args.blur,
            blur_amount: args.blur_amount,
            block_size_step: args.block_step,
            constant_step: args.constant_step,
        };
        let mut params = PreprocessParams::from(&sliders);
        if let Some(block_size) = args.block_size {
            params.block_size = block_size;
        }
        if let Some(constant) = args.constant {
            params.constant = constant;
        }
        params
    }
}

fn parse_block_size(value: &str) -> Result<u32, String> {
    let size = value
        .parse::<u32>()
        .map_err(|_| format!("block size must be a positive integer, got `{value}`"))?;
    if !(3..=KERNEL_SIZE_MAX).contains(&size) || size % 2 == 0 {
        return Err(format!(
            "block size {size} is invalid; expected an odd value from 3 to {KERNEL_SIZE_MAX}"
        ));
    }
    Ok(size)
}

/// Chain approximation modes for traced contours.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ChainArg {
    Simple,
    None,
}

impl From<ChainArg> for ChainApproximation {
    /// Convert ChainArg to splinegen::ChainApproximation.
    fn from(value: ChainArg) -> Self {
        match value {
            ChainArg::Simple => ChainApproximation::Simple,
            ChainArg::None => ChainApproximation::None,
        }
    }
}
