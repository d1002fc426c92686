use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command, value_parser};

/// Command-line overrides layered on top of the loaded settings.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub out_root: Option<PathBuf>,
    pub manifest_src: Option<PathBuf>,
    pub folder_src: Option<PathBuf>,
    pub tracks_per_album: Option<i64>,
}

impl CliOverrides {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config: matches.get_one::<PathBuf>("config").cloned(),
            out_root: matches.get_one::<PathBuf>("out-root").cloned(),
            manifest_src: matches.get_one::<PathBuf>("manifest-src").cloned(),
            folder_src: matches.get_one::<PathBuf>("folder-src").cloned(),
            tracks_per_album: matches.get_one::<i64>("tracks-per-album").copied(),
        }
    }
}

pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .about("Build a minimal Playt test archive from a few source albums")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("out-root")
                .long("out-root")
                .value_name("DIR")
                .help("Archive root; cartridges are written to <DIR>/cartridges/")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("manifest-src")
                .long("manifest-src")
                .value_name("DIR")
                .help("Source folder (containing playt.json) for the manifest album")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("folder-src")
                .long("folder-src")
                .value_name("DIR")
                .help("Source folder of audio files for the folder album")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("tracks-per-album")
                .short('n')
                .long("tracks-per-album")
                .value_name("N")
                .help("Number of tracks per album [default: 3]")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Config file to load instead of the default location")
                .value_parser(value_parser!(PathBuf)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOverrides {
        let matches = build_cli()
            .try_get_matches_from(std::iter::once("cartridge").chain(args.iter().copied()))
            .unwrap();
        CliOverrides::from_matches(&matches)
    }

    #[test]
    fn no_flags_means_no_overrides() {
        let o = parse(&[]);
        assert!(o.config.is_none());
        assert!(o.out_root.is_none());
        assert!(o.manifest_src.is_none());
        assert!(o.folder_src.is_none());
        assert!(o.tracks_per_album.is_none());
    }

    #[test]
    fn flags_are_collected() {
        let o = parse(&[
            "--out-root",
            "/tmp/out",
            "--manifest-src",
            "/src/bessie",
            "--folder-src",
            "/src/spells",
            "--tracks-per-album",
            "5",
        ]);
        assert_eq!(o.out_root, Some(PathBuf::from("/tmp/out")));
        assert_eq!(o.manifest_src, Some(PathBuf::from("/src/bessie")));
        assert_eq!(o.folder_src, Some(PathBuf::from("/src/spells")));
        assert_eq!(o.tracks_per_album, Some(5));
    }

    #[test]
    fn negative_track_limit_is_accepted() {
        assert_eq!(parse(&["-n", "-1"]).tracks_per_album, Some(-1));
    }

    #[test]
    fn non_numeric_track_limit_is_rejected() {
        assert!(
            build_cli()
                .try_get_matches_from(["cartridge", "--tracks-per-album", "three"])
                .is_err()
        );
    }
}
