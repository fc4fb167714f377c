use std::{
    env, fs,
    path::{Path, PathBuf},
};

use fixnoise::{field::ink_u8, FieldConfig, NoiseField};

#[derive(Clone, Copy)]
enum PreviewMode {
    Grain,
    Atkinson,
    Gray,
}

impl PreviewMode {
    fn name(self) -> &'static str {
        match self {
            Self::Grain => "grain",
            Self::Atkinson => "atkinson",
            Self::Gray => "gray",
        }
    }
}

struct Config {
    out_dir: PathBuf,
    width: i32,
    height: i32,
    cell_px: i32,
    octaves: u8,
    frame_start: u32,
    count: u32,
    mode: PreviewMode,
}

impl Default for Config {
    fn default() -> Self {
        let field = FieldConfig::default();
        Self {
            out_dir: PathBuf::from("tools/noise_preview/out"),
            width: field.width,
            height: field.height,
            cell_px: field.cell_px,
            octaves: field.octaves,
            frame_start: 0,
            count: 4,
            mode: PreviewMode::Atkinson,
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::init();

    let cfg = parse_args(env::args().skip(1))?;
    fs::create_dir_all(&cfg.out_dir).map_err(|e| format!("create output dir: {e}"))?;

    let mut field = NoiseField::new(FieldConfig {
        width: cfg.width,
        height: cfg.height,
        cell_px: cfg.cell_px,
        octaves: cfg.octaves,
        ..FieldConfig::default()
    })
    .map_err(|e| format!("field config: {}", e.label()))?;

    let width = cfg.width as u32;
    let height = cfg.height as u32;
    let pixels = (width as usize) * (height as usize);

    for i in 0..cfg.count {
        let frame = cfg.frame_start.wrapping_add(i);
        let mut buf = vec![255u8; pixels];
        render_frame(&cfg, &mut field, frame, &mut buf);
        let filename = format!("noise_{}_frame_{frame}.png", cfg.mode.name());
        let path = cfg.out_dir.join(filename);
        image::save_buffer(&path, &buf, width, height, image::ColorType::L8)
            .map_err(|e| format!("save {}: {e}", path.display()))?;
        println!("wrote {}", path.display());
    }

    Ok(())
}

fn render_frame(cfg: &Config, field: &mut NoiseField, frame: u32, buf: &mut [u8]) {
    let w = cfg.width as usize;
    match cfg.mode {
        PreviewMode::Grain => {
            field.render_rows_bw(0, cfg.height, frame, |x, y| {
                buf[(y as usize) * w + (x as usize)] = 0;
            });
        }
        PreviewMode::Atkinson => {
            field.render_bw_atkinson(frame, |x, y| {
                buf[(y as usize) * w + (x as usize)] = 0;
            });
        }
        PreviewMode::Gray => {
            for y in 0..cfg.height {
                for x in 0..cfg.width {
                    let ink = ink_u8(field.sample(x, y, frame));
                    buf[(y as usize) * w + (x as usize)] = 255 - ink;
                }
            }
        }
    }
}

fn parse_args<I>(args: I) -> Result<Config, String>
where
    I: IntoIterator<Item = String>,
{
    let mut cfg = Config::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--out" => cfg.out_dir = PathBuf::from(next_value("--out", &mut it)?),
            "--width" => cfg.width = parse_num(next_value("--width", &mut it)?, "--width")?,
            "--height" => cfg.height = parse_num(next_value("--height", &mut it)?, "--height")?,
            "--cell" => cfg.cell_px = parse_num(next_value("--cell", &mut it)?, "--cell")?,
            "--octaves" => cfg.octaves = parse_num(next_value("--octaves", &mut it)?, "--octaves")?,
            "--frame" => cfg.frame_start = parse_num(next_value("--frame", &mut it)?, "--frame")?,
            "--count" => cfg.count = parse_num(next_value("--count", &mut it)?, "--count")?,
            "--mode" => {
                let raw = next_value("--mode", &mut it)?;
                cfg.mode = match raw.as_str() {
                    "grain" => PreviewMode::Grain,
                    "atkinson" => PreviewMode::Atkinson,
                    "gray" => PreviewMode::Gray,
                    _ => return Err(format!("--mode must be grain|atkinson|gray, got {raw}")),
                };
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => return Err(format!("unknown arg: {arg}")),
        }
    }
    Ok(cfg)
}

fn next_value<I>(flag: &str, it: &mut I) -> Result<String, String>
where
    I: Iterator<Item = String>,
{
    it.next().ok_or_else(|| format!("missing value for {flag}"))
}

fn parse_num<T>(raw: String, name: &str) -> Result<T, String>
where
    T: core::str::FromStr,
{
    raw.parse::<T>()
        .map_err(|_| format!("invalid numeric value for {name}: {raw}"))
}

fn print_help() {
    let exe = env::args()
        .next()
        .and_then(|p| {
            Path::new(&p)
                .file_name()
                .and_then(|n| n.to_str())
                .map(|s| s.to_owned())
        })
        .unwrap_or_else(|| "noise_preview".to_owned());
    println!(
        "Usage: {exe} [--out DIR] [--frame N] [--count N] [--width W] [--height H] [--cell PX] [--octaves N] [--mode grain|atkinson|gray]"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let cfg = parse_args(args(&[
            "--width", "32", "--height", "16", "--cell", "8", "--octaves", "2", "--frame", "9",
            "--count", "1", "--mode", "gray",
        ]))
        .unwrap();
        assert_eq!((cfg.width, cfg.height, cfg.cell_px), (32, 16, 8));
        assert_eq!((cfg.octaves, cfg.frame_start, cfg.count), (2, 9, 1));
        assert!(matches!(cfg.mode, PreviewMode::Gray));
    }

    #[test]
    fn rejects_unknown_mode_and_missing_value() {
        assert!(parse_args(args(&["--mode", "sepia"])).is_err());
        assert!(parse_args(args(&["--width"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }
}
