use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tune_queue::config::{self, QueueSettings};
use tune_queue::{Queue, Track};

#[derive(Debug, Default)]
struct CliArgs {
    tracks: Option<PathBuf>,
    current: Option<String>,
    shuffle: bool,
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args(std::env::args().skip(1).collect())?;
    let Some(tracks_path) = args.tracks.as_deref() else {
        anyhow::bail!("--tracks is required (see --help)");
    };

    let settings = settings_from(&config::settings_path()?, args.seed)?;
    let mut queue = Queue::with_settings(&settings);
    queue.replace_queue_with(load_tracks(tracks_path)?);
    if args.shuffle {
        queue.shuffle();
    }

    if let Some(id) = &args.current {
        let Some(track) = queue.all().iter().find(|track| &track.id == id).cloned() else {
            anyhow::bail!("no track with id {id} in {}", tracks_path.display());
        };
        queue.set_current(Some(track));
    }

    print!("{}", render(&queue));
    Ok(())
}

fn load_tracks(path: &Path) -> anyhow::Result<Vec<Track>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read track list {}", path.display()))?;
    let tracks: Vec<Track> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse track list {}", path.display()))?;
    log::info!("loaded {} track(s) from {}", tracks.len(), path.display());
    Ok(tracks)
}

fn settings_from(path: &Path, seed: Option<u64>) -> anyhow::Result<QueueSettings> {
    let mut settings = config::load_settings_from(path)?;
    if seed.is_some() {
        settings.shuffle_seed = seed;
    }
    Ok(settings)
}

fn render(queue: &Queue<Track>) -> String {
    let mut out = String::new();
    let current_id = queue.current().map(|track| track.id.as_str());

    for (idx, track) in queue.all().iter().enumerate() {
        let marker = if Some(track.id.as_str()) == current_id { ">" } else { " " };
        out.push_str(&format!("{marker} {:>3}. {}\n", idx + 1, track.label()));
    }

    let label = |track: Option<&Track>| track.map_or_else(|| String::from("-"), Track::label);
    out.push_str(&format!("next: {}\n", label(queue.next())));
    out.push_str(&format!("previous: {}\n", label(queue.previous())));
    out
}

fn parse_args(args: Vec<String>) -> anyhow::Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--shuffle" => out.shuffle = true,
            "--tracks" => {
                index += 1;
                let Some(value) = args.get(index) else {
                    anyhow::bail!("--tracks requires a file path");
                };
                out.tracks = Some(PathBuf::from(value));
            }
            "--current" => {
                index += 1;
                let Some(value) = args.get(index) else {
                    anyhow::bail!("--current requires a track id");
                };
                if value.trim().is_empty() {
                    anyhow::bail!("--current cannot be empty");
                }
                out.current = Some(value.trim().to_string());
            }
            "--seed" => {
                index += 1;
                let Some(value) = args.get(index) else {
                    anyhow::bail!("--seed requires a number");
                };
                let seed = value
                    .parse()
                    .with_context(|| format!("invalid --seed value {value}"))?;
                out.seed = Some(seed);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument {other}"),
        }
        index += 1;
    }
    Ok(out)
}

fn print_help() {
    println!("tune-queue");
    println!("  --tracks FILE     JSON array of tracks to queue");
    println!("  --current ID      Mark the track with this id as playing");
    println!("  --shuffle         Shuffle the queue before printing");
    println!("  --seed N          Seed used for --shuffle");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let parsed = parse_args(args(&[
            "--tracks", "list.json", "--current", " b ", "--shuffle", "--seed", "9",
        ]))
        .expect("parse");
        assert_eq!(parsed.tracks, Some(PathBuf::from("list.json")));
        assert_eq!(parsed.current.as_deref(), Some("b"));
        assert!(parsed.shuffle);
        assert_eq!(parsed.seed, Some(9));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(args(&["--tracks"])).is_err());
        assert!(parse_args(args(&["--seed", "x"])).is_err());
        assert!(parse_args(args(&["--what"])).is_err());
    }

    #[test]
    fn render_marks_current_and_neighbours() {
        let mut queue = Queue::new();
        queue.queue([Track::new("a", "A"), Track::new("b", "B"), Track::new("c", "C")]);
        queue.set_current(Some(Track::new("b", "B")));

        let out = render(&queue);
        assert!(out.contains(">   2. B"));
        assert!(out.contains("next: C"));
        assert!(out.contains("previous: A"));
    }

    #[test]
    fn malformed_settings_abort_startup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").expect("write");

        assert!(settings_from(&path, None).is_err());
    }

    #[test]
    fn seed_flag_overrides_settings_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"shuffle_seed":1}"#).expect("write");

        assert_eq!(settings_from(&path, None).expect("load").shuffle_seed, Some(1));
        assert_eq!(settings_from(&path, Some(5)).expect("load").shuffle_seed, Some(5));
    }

    #[test]
    fn load_tracks_reads_json_list() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tracks.json");
        fs::write(
            &path,
            r#"[{"id":"1","path":"1.mp3","title":"One","artist":"X"},{"id":"2","path":"2.mp3","title":"Two"}]"#,
        )
        .expect("write");

        let tracks = load_tracks(&path).expect("load");
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].label(), "X - One");
    }
}
