use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use embedded_vision::{
    BasicImage, BlobInfo, Brightness, Connectivity, Content, FilterOp, HeapAllocator,
    PixelAllocator, PoolAllocator, analyse_blob, centroid, contrast_stretch,
    contrast_stretch_fast, fill_holes, invert_in_place, label_blobs, nonlinear_filter,
    remove_border_blobs, subtract, threshold, threshold_otsu, threshold_two_means,
};
use image::GrayImage;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "ev_gallery")]
#[command(about = "Run embedded-vision pipelines on image files")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Segment, label and classify dark blobs.
    #[command(name = "blobs")]
    Blobs(BlobsArgs),
    /// Global Otsu or two-means threshold.
    #[command(name = "threshold")]
    Threshold(ThresholdArgs),
    /// Nonlinear windowed filter.
    #[command(name = "filter")]
    Filter(FilterArgs),
    /// Linear contrast stretch.
    #[command(name = "stretch")]
    Stretch(StretchArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = AllocatorArg::Heap)]
    allocator: AllocatorArg,
}

#[derive(Args, Debug, Clone)]
struct BlobsArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// JSON file with form-factor bands; built-in bands when absent.
    #[arg(long)]
    bands: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = SegmentArg::Adaptive)]
    segment: SegmentArg,
    #[arg(long, default_value_t = 7)]
    window: usize,
    #[arg(long, value_enum, default_value_t = ConnectivityArg::C8)]
    connectivity: ConnectivityArg,
}

#[derive(Args, Debug, Clone)]
struct ThresholdArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, value_enum, default_value_t = MethodArg::Otsu)]
    method: MethodArg,
    #[arg(long, value_enum, default_value_t = BrightnessArg::Dark)]
    brightness: BrightnessArg,
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, value_enum, default_value_t = FilterArg::Median)]
    op: FilterArg,
    #[arg(long, default_value_t = 3)]
    size: usize,
}

#[derive(Args, Debug, Clone)]
struct StretchArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 0)]
    bottom: u8,
    #[arg(long, default_value_t = 255)]
    top: u8,
    /// Use the lookup-table variant.
    #[arg(long, default_value_t = false)]
    lut: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum AllocatorArg {
    Heap,
    Pool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SegmentArg {
    Adaptive,
    Otsu,
    TwoMeans,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum MethodArg {
    Otsu,
    TwoMeans,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum BrightnessArg {
    Dark,
    Bright,
}

impl From<BrightnessArg> for Brightness {
    fn from(b: BrightnessArg) -> Self {
        match b {
            BrightnessArg::Dark => Brightness::Dark,
            BrightnessArg::Bright => Brightness::Bright,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ConnectivityArg {
    C4,
    C8,
}

impl From<ConnectivityArg> for Connectivity {
    fn from(c: ConnectivityArg) -> Self {
        match c {
            ConnectivityArg::C4 => Connectivity::C4,
            ConnectivityArg::C8 => Connectivity::C8,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FilterArg {
    Average,
    Harmonic,
    Max,
    Median,
    Midpoint,
    Min,
    Range,
}

impl From<FilterArg> for FilterOp {
    fn from(op: FilterArg) -> Self {
        match op {
            FilterArg::Average => FilterOp::Average,
            FilterArg::Harmonic => FilterOp::Harmonic,
            FilterArg::Max => FilterOp::Max,
            FilterArg::Median => FilterOp::Median,
            FilterArg::Midpoint => FilterOp::Midpoint,
            FilterArg::Min => FilterOp::Min,
            FilterArg::Range => FilterOp::Range,
        }
    }
}

/// Closed form-factor interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Band {
    min: f32,
    max: f32,
}

impl Band {
    fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Form-factor bands used to name blobs. A disc scores about 4π, a square
/// about 16 and an equilateral triangle about 21.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct ShapeBands {
    square: Band,
    circle: Band,
    triangle: Band,
}

impl Default for ShapeBands {
    fn default() -> Self {
        Self {
            square: Band {
                min: 15.0,
                max: 17.0,
            },
            circle: Band {
                min: 10.5,
                max: 14.5,
            },
            triangle: Band {
                min: 19.0,
                max: 28.0,
            },
        }
    }
}

impl ShapeBands {
    fn classify(&self, form_factor: f32) -> &'static str {
        if self.square.contains(form_factor) {
            "square"
        } else if self.circle.contains(form_factor) {
            "circle"
        } else if self.triangle.contains(form_factor) {
            "triangle"
        } else {
            "unknown"
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct BlobDto {
    label: u8,
    min_x: usize,
    min_y: usize,
    width: usize,
    height: usize,
    pixel_count: usize,
    perimeter: f32,
    form_factor: f32,
    centroid: [usize; 2],
    shape: &'static str,
}

impl BlobDto {
    fn new(label: u8, info: &BlobInfo, centroid: (usize, usize), shape: &'static str) -> Self {
        Self {
            label,
            min_x: info.min_x,
            min_y: info.min_y,
            width: info.width,
            height: info.height,
            pixel_count: info.pixel_count,
            perimeter: info.perimeter,
            form_factor: info.form_factor(),
            centroid: [centroid.0, centroid.1],
            shape,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct MetaBlobs {
    segment: &'static str,
    window: usize,
    connectivity: &'static str,
    allocator: &'static str,
    blob_count: u8,
    bands: ShapeBands,
}

#[derive(Debug, Clone, Serialize)]
struct MetaThreshold {
    method: &'static str,
    brightness: &'static str,
    level: u8,
    foreground: usize,
}

#[derive(Debug, Clone, Serialize)]
struct MetaFilter {
    op: String,
    size: usize,
    border: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct MetaStretch {
    bottom: u8,
    top: u8,
    lut: bool,
    input_min: u8,
    input_max: u8,
}

/// Buffer source for every stage image of one run.
struct Frames {
    width: usize,
    height: usize,
    alloc: Box<dyn PixelAllocator>,
    name: &'static str,
}

impl Frames {
    fn new(kind: AllocatorArg, width: usize, height: usize, slots: usize) -> Result<Self> {
        let (alloc, name): (Box<dyn PixelAllocator>, _) = match kind {
            AllocatorArg::Heap => (Box::new(HeapAllocator), "heap"),
            AllocatorArg::Pool => (
                Box::new(
                    PoolAllocator::new(slots, width * height)
                        .context("reserving pixel pool")?,
                ),
                "pool",
            ),
        };
        Ok(Self {
            width,
            height,
            alloc,
            name,
        })
    }

    fn image(&self) -> Result<BasicImage> {
        BasicImage::new_in(self.width, self.height, self.alloc.as_ref())
            .with_context(|| format!("allocating {}x{} frame", self.width, self.height))
    }

    fn release(&self, img: BasicImage) {
        img.destroy_in(self.alloc.as_ref());
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Blobs(args) => run_blobs(args),
        Command::Threshold(args) => run_threshold(args),
        Command::Filter(args) => run_filter(args),
        Command::Stretch(args) => run_stretch(args),
    }
}

fn run_blobs(args: BlobsArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "blobs")?;
    let bands = match &args.bands {
        Some(path) => read_json(path)
            .with_context(|| format!("reading shape bands at {}", path.display()))?,
        None => ShapeBands::default(),
    };
    let conn = Connectivity::from(args.connectivity);

    let src = load_input_u8(&args.common.input)?;
    let frames = Frames::new(args.common.allocator, src.width(), src.height(), 5)?;

    let mut binary = frames.image()?;
    let segment = match args.segment {
        SegmentArg::Adaptive => {
            if args.window == 0 || args.window.is_multiple_of(2) {
                bail!("adaptive window must be odd, got {}", args.window);
            }
            let mut local = frames.image()?;
            nonlinear_filter(&src, &mut local, FilterOp::Average, args.window);
            subtract(&src, &mut local);
            threshold(&local, &mut binary, 0, 1);
            frames.release(local);
            invert_in_place(&mut binary);
            "adaptive"
        }
        SegmentArg::Otsu => {
            let t = threshold_otsu(&src, &mut binary, Brightness::Dark);
            log::info!("otsu level {t}");
            "otsu"
        }
        SegmentArg::TwoMeans => {
            let t = threshold_two_means(&src, &mut binary, Brightness::Dark);
            log::info!("two-means level {t}");
            "two_means"
        }
    };
    save_stage(&case_dir, "binary.png", &binary)?;

    let mut cleared = frames.image()?;
    remove_border_blobs(&binary, &mut cleared, conn);
    save_stage(&case_dir, "cleared.png", &cleared)?;

    let mut filled = frames.image()?;
    fill_holes(&cleared, &mut filled, conn);
    save_stage(&case_dir, "filled.png", &filled)?;

    let mut labels = frames.image()?;
    let count = label_blobs(&filled, &mut labels, conn).context("labeling blobs")?;
    save_stage(&case_dir, "labels.png", &labels)?;
    log::info!("{count} blobs");

    let mut blobs = Vec::with_capacity(usize::from(count));
    for label in 1..=count {
        let info = analyse_blob(&labels, label)
            .with_context(|| format!("analysing blob {label}"))?;
        let c = centroid(&labels, label).with_context(|| format!("centroid of blob {label}"))?;
        let shape = bands.classify(info.form_factor());
        log::debug!(
            "blob {label}: {} px, form factor {:.2} -> {shape}",
            info.pixel_count,
            info.form_factor()
        );
        blobs.push(BlobDto::new(label, &info, c, shape));
    }
    write_json(case_dir.join("blobs.json"), &blobs)?;

    write_json(
        case_dir.join("meta.json"),
        &MetaBlobs {
            segment,
            window: args.window,
            connectivity: connectivity_name(conn),
            allocator: frames.name,
            blob_count: count,
            bands,
        },
    )?;

    for img in [binary, cleared, filled, labels] {
        frames.release(img);
    }
    Ok(())
}

fn run_threshold(args: ThresholdArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "threshold")?;
    let src = load_input_u8(&args.common.input)?;
    let frames = Frames::new(args.common.allocator, src.width(), src.height(), 1)?;

    let mut dst = frames.image()?;
    let brightness = Brightness::from(args.brightness);
    let (method, level) = match args.method {
        MethodArg::Otsu => ("otsu", threshold_otsu(&src, &mut dst, brightness)),
        MethodArg::TwoMeans => ("two_means", threshold_two_means(&src, &mut dst, brightness)),
    };
    save_stage(&case_dir, "binary.png", &dst)?;

    write_json(
        case_dir.join("meta.json"),
        &MetaThreshold {
            method,
            brightness: match brightness {
                Brightness::Dark => "dark",
                Brightness::Bright => "bright",
            },
            level,
            foreground: dst.data().iter().filter(|&&v| v == 1).count(),
        },
    )?;

    frames.release(dst);
    Ok(())
}

fn run_filter(args: FilterArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "filter")?;
    if args.size == 0 || args.size.is_multiple_of(2) {
        bail!("filter size must be odd, got {}", args.size);
    }
    let src = load_input_u8(&args.common.input)?;
    let frames = Frames::new(args.common.allocator, src.width(), src.height(), 1)?;

    let op = FilterOp::from(args.op);
    let mut dst = frames.image()?;
    nonlinear_filter(&src, &mut dst, op, args.size);
    save_stage(&case_dir, "filtered.png", &dst)?;

    write_json(
        case_dir.join("meta.json"),
        &MetaFilter {
            op: format!("{op:?}"),
            size: args.size,
            border: "window clipped to image",
        },
    )?;

    frames.release(dst);
    Ok(())
}

fn run_stretch(args: StretchArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "stretch")?;
    if args.bottom > args.top {
        bail!("bottom {} exceeds top {}", args.bottom, args.top);
    }
    let src = load_input_u8(&args.common.input)?;
    let frames = Frames::new(args.common.allocator, src.width(), src.height(), 1)?;

    let mut dst = frames.image()?;
    if args.lut {
        contrast_stretch_fast(&src, &mut dst, args.bottom, args.top);
    } else {
        contrast_stretch(&src, &mut dst, args.bottom, args.top);
    }
    save_stage(&case_dir, "stretched.png", &dst)?;

    write_json(
        case_dir.join("meta.json"),
        &MetaStretch {
            bottom: args.bottom,
            top: args.top,
            lut: args.lut,
            input_min: src.data().iter().copied().min().unwrap_or(0),
            input_max: src.data().iter().copied().max().unwrap_or(0),
        },
    )?;

    frames.release(dst);
    Ok(())
}

fn prepare_case(common: &CommonArgs, case_name: &str) -> Result<PathBuf> {
    ensure_file_exists(&common.input, "input")?;

    let case_dir = common.out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    let copied = case_dir.join("input.png");
    let gray = image::open(&common.input)
        .with_context(|| format!("opening input image {}", common.input.display()))?
        .to_luma8();
    gray.save(&copied)
        .with_context(|| format!("saving input copy {}", copied.display()))?;

    Ok(case_dir)
}

fn load_input_u8(path: &Path) -> Result<BasicImage> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw();

    BasicImage::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing basic image from {}", path.display()))
}

/// Binary and label images hold small values; spread them over 0..=255.
fn display_bytes(img: &BasicImage) -> Vec<u8> {
    match img.content() {
        Content::Intensity => img.data().to_vec(),
        Content::Binary => img
            .data()
            .iter()
            .map(|&v| if v == 0 { 0 } else { 255 })
            .collect(),
        Content::Labeled => {
            let max = img.data().iter().copied().max().unwrap_or(0);
            if max == 0 {
                return vec![0; img.len()];
            }
            let step = 255 / u16::from(max);
            img.data()
                .iter()
                .map(|&v| (u16::from(v) * step) as u8)
                .collect()
        }
    }
}

fn save_stage(case_dir: &Path, name: &str, img: &BasicImage) -> Result<()> {
    save_luma_raw(case_dir.join(name), img.width(), img.height(), display_bytes(img))
}

fn save_luma_raw(path: PathBuf, width: usize, height: usize, data: Vec<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(width as u32, height as u32, data)
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn connectivity_name(conn: Connectivity) -> &'static str {
    match conn {
        Connectivity::C4 => "C4",
        Connectivity::C8 => "C8",
    }
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
