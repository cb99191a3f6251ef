use std::path::PathBuf;

#[derive(Debug, Default)]
struct CliArgs {
    playlist: Option<PathBuf>,
    player: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1).collect())?;
    let Some(playlist_path) = args.playlist else {
        print_help();
        std::process::exit(2);
    };

    vidcull::app::run(vidcull::app::AppOptions {
        playlist_path,
        player_program: args.player,
    })
}

fn parse_args(args: Vec<String>) -> anyhow::Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--player" => {
                index += 1;
                let Some(value) = args.get(index) else {
                    anyhow::bail!("--player requires a path to the player executable");
                };
                out.player = Some(PathBuf::from(value));
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other if other.starts_with('-') => anyhow::bail!("unknown argument {other}"),
            other => {
                if out.playlist.is_some() {
                    anyhow::bail!("only one playlist file is expected");
                }
                out.playlist = Some(PathBuf::from(other));
            }
        }
        index += 1;
    }
    Ok(out)
}

fn print_help() {
    println!("vidcull <playlist>");
    println!("  <playlist>        File listing one video path per line");
    println!("  --player <path>   Player executable (default: mplayer from PATH)");
}
