use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use bytemuck::cast_slice;
use log::{debug, error, info, LevelFilter};
use structopt::StructOpt;
use walkdir::{DirEntry, WalkDir};

use tgx::consts::TGX_EXTENSION;
use tgx::{decode_to_image, encode_to_vec, Image, RasterImage};

const PNG_EXTENSION: &str = "png";

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().unwrap_or_default().to_string_lossy().to_ascii_lowercase() == ext
}

fn is_tgx_file(path: &Path) -> bool {
    has_extension(path, TGX_EXTENSION)
}

/// Explicit files are taken as-is; directories are searched for TGX and PNG files.
fn find_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let is_image_file = |path: &PathBuf| {
        path.is_file() && (has_extension(path, TGX_EXTENSION) || has_extension(path, PNG_EXTENSION))
    };

    let mut out = vec![];
    for path in paths {
        if path.is_file() {
            out.push(path.clone());
        } else if path.is_dir() {
            out.extend(
                WalkDir::new(path)
                    .follow_links(true)
                    .into_iter()
                    .filter_map(Result::ok)
                    .map(DirEntry::into_path)
                    .filter(is_image_file),
            )
        } else {
            bail!("path doesn't exist: {}", path.to_string_lossy());
        }
    }
    out.sort_unstable();
    Ok(out)
}

fn grayscale_to_rgba(buf: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(buf.len() * 4);
    for &px in buf {
        out.extend([px, px, px, 0xff]);
    }
    out
}

fn grayscale_alpha_to_rgba(buf: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(buf.len() * 2);
    for &[v, a] in cast_slice::<_, [u8; 2]>(buf) {
        out.extend([v, v, v, a]);
    }
    out
}

fn rgb_to_rgba(buf: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(buf.len() / 3 * 4);
    for &[r, g, b] in cast_slice::<_, [u8; 3]>(buf) {
        out.extend([r, g, b, 0xff]);
    }
    out
}

fn read_png(filename: &Path) -> Result<Image> {
    let mut decoder = png::Decoder::new(File::open(filename)?);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;
    let mut whole_buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut whole_buf)?;
    let buf = &whole_buf[..info.buffer_size()];
    ensure!(info.bit_depth == png::BitDepth::Eight, "invalid bit depth: {:?}", info.bit_depth);
    let data = match info.color_type {
        png::ColorType::Grayscale => grayscale_to_rgba(buf),
        png::ColorType::GrayscaleAlpha => grayscale_alpha_to_rgba(buf),
        png::ColorType::Rgb => rgb_to_rgba(buf),
        png::ColorType::Rgba => buf.to_vec(),
        color_type => bail!("unsupported color type: {:?}", color_type),
    };
    Ok(Image::from_rgba_bytes(info.width, info.height, data)?)
}

fn write_png(filename: &Path, img: &Image) -> Result<()> {
    let file = BufWriter::new(File::create(filename)?);
    let mut encoder = png::Encoder::new(file, img.width(), img.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(img.as_rgba_bytes())?;
    writer.finish()?;
    Ok(())
}

/// Verifies that `decoded` is within the 5-bit quantization error of `original`.
fn check_lossy(original: &Image, decoded: &Image) -> Result<()> {
    ensure!(
        (original.width(), original.height()) == (decoded.width(), decoded.height()),
        "size mismatch: {}x{} vs {}x{}",
        original.width(),
        original.height(),
        decoded.width(),
        decoded.height()
    );
    for (i, (src, dst)) in original.pixels().iter().zip(decoded.pixels()).enumerate() {
        let ok = if src.is_transparent() {
            dst.to_array() == [0; 4]
        } else {
            dst.a == 0xff
                && [(src.r, dst.r), (src.g, dst.g), (src.b, dst.b)]
                    .iter()
                    .all(|&(a, b)| a >= b && a - b <= 7)
        };
        let (x, y) = (i as u32 % original.width(), i as u32 / original.width());
        ensure!(ok, "pixel ({}, {}) doesn't roundtrip: {:?} -> {:?}", x, y, src, dst);
    }
    Ok(())
}

fn output_path(input: &Path, out_dir: Option<&Path>, ext: &str) -> PathBuf {
    let dir = out_dir.or_else(|| input.parent()).unwrap_or_else(|| Path::new(""));
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(ext);
    dir.join(name)
}

/// Absolute form of a path that may not exist yet: the parent directory is
/// resolved and the file name kept.
fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(path) = path.canonicalize() {
        return path;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() { Path::new(".") } else { parent };
            parent.canonicalize().map_or_else(|_| path.to_path_buf(), |parent| parent.join(name))
        }
        _ => path.to_path_buf(),
    }
}

/// Rejects outputs that are inputs of the same run, and existing files unless `force` is set.
fn check_output(output: &Path, inputs: &BTreeSet<PathBuf>, force: bool) -> Result<()> {
    ensure!(
        !inputs.contains(&normalize_path(output)),
        "refusing to overwrite input file: {}",
        output.display()
    );
    ensure!(
        force || !output.exists(),
        "output file already exists (use --force to overwrite): {}",
        output.display()
    );
    Ok(())
}

#[derive(Debug, StructOpt)]
struct Args {
    /// Files or directories; `.tgx` files are converted to PNG, everything else to TGX.
    #[structopt(parse(from_os_str))]
    paths: Vec<PathBuf>,
    /// Write converted files here instead of next to the inputs.
    #[structopt(short, long, parse(from_os_str))]
    out_dir: Option<PathBuf>,
    /// Verify the round trip of every converted image.
    #[structopt(short, long)]
    check: bool,
    /// Overwrite existing output files; inputs of the same run are never overwritten.
    #[structopt(short, long)]
    force: bool,
    /// Enable debug logging.
    #[structopt(short, long)]
    verbose: bool,
}

fn decode_file(input: &Path, output: &Path, check: bool) -> Result<Image> {
    let data = fs::read(input)?;
    let img: Image = decode_to_image(&data)?;
    if check {
        let reencoded = encode_to_vec(&img)?;
        let redecoded: Image = decode_to_image(&reencoded)?;
        ensure!(redecoded == img, "re-encoded image differs from the decoded one");
        debug!("{}: re-encoded to {} bytes (source {} bytes)", input.display(), reencoded.len(), data.len());
    }
    write_png(output, &img)?;
    Ok(img)
}

fn encode_file(input: &Path, output: &Path, check: bool) -> Result<Image> {
    let img = read_png(input).context("error reading PNG file")?;
    let data = encode_to_vec(&img)?;
    if check {
        let decoded: Image = decode_to_image(&data)?;
        check_lossy(&img, &decoded)?;
    }
    fs::write(output, &data)?;
    Ok(img)
}

fn convert_file(input: &Path, inputs: &BTreeSet<PathBuf>, args: &Args) -> Result<()> {
    let to_png = is_tgx_file(input);
    let output = output_path(input, args.out_dir.as_deref(), if to_png { PNG_EXTENSION } else { TGX_EXTENSION });
    check_output(&output, inputs, args.force)?;
    let img = if to_png {
        decode_file(input, &output, args.check)?
    } else {
        encode_file(input, &output, args.check)?
    };
    let size_in_kb = fs::metadata(input)?.len() as f64 / 1024.;
    let size_out_kb = fs::metadata(&output)?.len() as f64 / 1024.;
    info!(
        "{} -> {} ({}x{}, {:.1} KB -> {:.1} KB)",
        input.display(),
        output.display(),
        img.width(),
        img.height(),
        size_in_kb,
        size_out_kb
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = <Args as StructOpt>::from_args();
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    ensure!(!args.paths.is_empty(), "no input paths given");
    let files = find_inputs(&args.paths)?;
    ensure!(!files.is_empty(), "no TGX or PNG files found in given paths");
    if let Some(out_dir) = &args.out_dir {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("error creating output directory: {}", out_dir.display()))?;
    }

    let inputs: BTreeSet<PathBuf> = files.iter().map(|file| normalize_path(file)).collect();
    let mut n_failed = 0;
    for file in &files {
        if let Err(err) = convert_file(file, &inputs, &args) {
            error!("{}: {:#}", file.display(), err);
            n_failed += 1;
        }
    }
    info!("converted {} of {} files", files.len() - n_failed, files.len());
    if n_failed != 0 {
        bail!("{} files failed to convert", n_failed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> Result<PathBuf> {
        let dir = std::env::temp_dir().join(format!("tgx-convert-{}-{}", name, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    fn input_set(files: &[PathBuf]) -> BTreeSet<PathBuf> {
        files.iter().map(|file| normalize_path(file)).collect()
    }

    #[test]
    fn test_output_never_overwrites_input() -> Result<()> {
        let dir = scratch_dir("inputs")?;
        fs::write(dir.join("sprite.tgx"), [1, 0, 0, 0, 1, 0, 0, 0, 0x80])?;
        fs::write(dir.join("sprite.png"), b"png")?;
        let files = find_inputs(&[dir.clone()])?;
        assert_eq!(files.len(), 2);
        let inputs = input_set(&files);

        for file in &files {
            let ext = if is_tgx_file(file) { PNG_EXTENSION } else { TGX_EXTENSION };
            let output = output_path(file, None, ext);
            assert!(check_output(&output, &inputs, false).is_err());
            assert!(check_output(&output, &inputs, true).is_err());
        }

        // the same file reached through a different spelling is still an input
        let dotted = dir.join(".").join("sprite.tgx");
        assert!(check_output(&dotted, &inputs, true).is_err());

        fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn test_existing_output_requires_force() -> Result<()> {
        let dir = scratch_dir("force")?;
        let input = dir.join("sprite.tgx");
        fs::write(&input, [1, 0, 0, 0, 1, 0, 0, 0, 0x80])?;
        let inputs = input_set(&[input.clone()]);

        let output = output_path(&input, None, PNG_EXTENSION);
        assert_eq!(output, dir.join("sprite.png"));
        check_output(&output, &inputs, false)?;

        fs::write(&output, b"png")?;
        assert!(check_output(&output, &inputs, false).is_err());
        check_output(&output, &inputs, true)?;

        fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn test_output_path() {
        let out_dir = Path::new("out");
        assert_eq!(output_path(Path::new("gfx/a.b.tgx"), None, "png"), Path::new("gfx/a.b.png"));
        assert_eq!(output_path(Path::new("gfx/a.PNG"), Some(out_dir), "tgx"), Path::new("out/a.tgx"));
        assert_eq!(normalize_path(Path::new("./src/main.rs")), normalize_path(Path::new("src/main.rs")));
    }
}
