use std::path::PathBuf;

pub const USAGE: &str = "\
usage:
  singalong                                play \"All Songs\" from the library
  singalong <audio> <lyrics>               play one song
  singalong --playlist <name>              play a saved playlist
  singalong --folder <dir> [name]          save and play a playlist of a folder
  singalong --library                      save and play \"All Songs\"
  singalong --scan                         save one playlist per library subfolder
  singalong --list                         list saved playlists
  singalong --create <name>                create an empty playlist
  singalong --add <name> <audio> [lrc]     add a song to a playlist
  singalong --remove <name> <audio> [lrc]  remove a song from a playlist
  singalong --delete <name>                delete a saved playlist";

/// What the player was asked to do on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    Song {
        audio: PathBuf,
        lyrics: PathBuf,
    },
    Playlist(String),
    Folder {
        dir: PathBuf,
        name: Option<String>,
    },
    Library,
    Scan,
    List,
    Create(String),
    /// `lyrics` defaults to the `.lrc` next to the audio file.
    Add {
        name: String,
        audio: PathBuf,
        lyrics: Option<PathBuf>,
    },
    Remove {
        name: String,
        audio: PathBuf,
        lyrics: Option<PathBuf>,
    },
    Delete(String),
    Help,
}

/// Parse the arguments after the program name.
pub fn parse<I>(args: I) -> Result<Launch, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();

    let Some(first) = args.first() else {
        return Ok(Launch::Library);
    };

    // Each command also says how many arguments it may take in total.
    let (launch, max) = match first.as_str() {
        "-h" | "--help" => (Launch::Help, 1),
        "--library" => (Launch::Library, 1),
        "--scan" => (Launch::Scan, 1),
        "--list" => (Launch::List, 1),
        "--playlist" => (Launch::Playlist(required(&args, 1, "--playlist <name>")?), 2),
        "--create" => (Launch::Create(required(&args, 1, "--create <name>")?), 2),
        "--delete" => (Launch::Delete(required(&args, 1, "--delete <name>")?), 2),
        "--folder" => {
            let dir = required(&args, 1, "--folder <dir>")?;
            let launch = Launch::Folder {
                dir: PathBuf::from(dir),
                name: args.get(2).cloned(),
            };
            (launch, 3)
        }
        "--add" => {
            let name = required(&args, 1, "--add <name> <audio>")?;
            let audio = required(&args, 2, "--add <name> <audio>")?;
            let launch = Launch::Add {
                name,
                audio: PathBuf::from(audio),
                lyrics: args.get(3).map(PathBuf::from),
            };
            (launch, 4)
        }
        "--remove" => {
            let name = required(&args, 1, "--remove <name> <audio>")?;
            let audio = required(&args, 2, "--remove <name> <audio>")?;
            let launch = Launch::Remove {
                name,
                audio: PathBuf::from(audio),
                lyrics: args.get(3).map(PathBuf::from),
            };
            (launch, 4)
        }
        flag if flag.starts_with('-') => return Err(format!("unknown option: {flag}")),
        audio => {
            let launch = Launch::Song {
                audio: PathBuf::from(audio),
                lyrics: PathBuf::from(required(&args, 1, "<audio> <lyrics>")?),
            };
            (launch, 2)
        }
    };

    if let Some(extra) = args.get(max) {
        return Err(format!("unexpected argument: {extra}"));
    }
    Ok(launch)
}

fn required(args: &[String], index: usize, what: &str) -> Result<String, String> {
    args.get(index)
        .cloned()
        .ok_or_else(|| format!("missing argument: {what}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_strs(args: &[&str]) -> Result<Launch, String> {
        parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_plays_the_library() {
        assert_eq!(parse_strs(&[]), Ok(Launch::Library));
    }

    #[test]
    fn two_paths_play_a_single_song() {
        assert_eq!(
            parse_strs(&["a.mp3", "a.lrc"]),
            Ok(Launch::Song {
                audio: "a.mp3".into(),
                lyrics: "a.lrc".into()
            })
        );
        assert!(parse_strs(&["a.mp3"]).is_err());
    }

    #[test]
    fn playlist_commands_take_names() {
        assert_eq!(
            parse_strs(&["--playlist", "Road Trip"]),
            Ok(Launch::Playlist("Road Trip".into()))
        );
        assert_eq!(parse_strs(&["--delete", "old"]), Ok(Launch::Delete("old".into())));
        assert!(parse_strs(&["--playlist"]).is_err());
    }

    #[test]
    fn folder_name_is_optional() {
        assert_eq!(
            parse_strs(&["--folder", "rock"]),
            Ok(Launch::Folder {
                dir: "rock".into(),
                name: None
            })
        );
        assert_eq!(
            parse_strs(&["--folder", "rock", "Rock"]),
            Ok(Launch::Folder {
                dir: "rock".into(),
                name: Some("Rock".into())
            })
        );
    }

    #[test]
    fn playlist_editing_commands() {
        assert_eq!(parse_strs(&["--create", "mix"]), Ok(Launch::Create("mix".into())));
        assert_eq!(
            parse_strs(&["--add", "mix", "a.mp3"]),
            Ok(Launch::Add {
                name: "mix".into(),
                audio: "a.mp3".into(),
                lyrics: None
            })
        );
        assert_eq!(
            parse_strs(&["--add", "mix", "a.mp3", "words.lrc"]),
            Ok(Launch::Add {
                name: "mix".into(),
                audio: "a.mp3".into(),
                lyrics: Some("words.lrc".into())
            })
        );
        assert_eq!(
            parse_strs(&["--remove", "mix", "a.mp3"]),
            Ok(Launch::Remove {
                name: "mix".into(),
                audio: "a.mp3".into(),
                lyrics: None
            })
        );
        assert!(parse_strs(&["--create"]).is_err());
        assert!(parse_strs(&["--add", "mix"]).is_err());
        assert!(parse_strs(&["--remove", "mix", "a.mp3", "a.lrc", "x"]).is_err());
    }

    #[test]
    fn rejects_unknown_and_extra_arguments() {
        assert!(parse_strs(&["--bogus"]).is_err());
        assert!(parse_strs(&["--list", "extra"]).is_err());
        assert!(parse_strs(&["a.mp3", "a.lrc", "b"]).is_err());
        assert!(parse_strs(&["--folder", "a", "b", "c"]).is_err());
    }
}
