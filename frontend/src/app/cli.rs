use clap::Parser;

/// Weather, snowguns and runs for one ski area.
#[derive(Debug, Clone, Default, PartialEq, Parser)]
#[command(
    name = "snowmaking-dashboard",
    after_help = "Examples:\n  snowmaking-dashboard \"Snow Valley, CA\"\n  snowmaking-dashboard \"Bear Mountain, CA\" --run \"Chair 9 Run\" --watch 600"
)]
pub struct Options {
    /// Ski area to open (default: first one in the catalog)
    pub site: Option<String>,
    /// Select a snowgun (default: first one)
    #[arg(long, value_name = "ID")]
    pub snowgun: Option<String>,
    /// Highlight a run
    #[arg(long, value_name = "NAME")]
    pub run: Option<String>,
    /// Change the selected snowgun's run
    #[arg(long, value_name = "NAME")]
    pub set_run: Option<String>,
    /// Change the selected snowgun's hydrant number. Kept as typed and
    /// validated when applied.
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub set_hydrant: Option<String>,
    /// Refresh the weather every SECONDS until Ctrl-C
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub watch: Option<u64>,
    /// Download the ski area basemap
    #[arg(long)]
    pub map: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{error::ErrorKind, CommandFactory};

    fn parse(args: &[&str]) -> Result<Options, clap::Error> {
        Options::try_parse_from(std::iter::once("snowmaking-dashboard").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_definition() {
        Options::command().debug_assert();
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Options::default());
    }

    #[test]
    fn test_full_command_line() {
        let options = parse(&[
            "Bear Mountain, CA",
            "--snowgun",
            "RAT-001",
            "--run",
            "Chair 9 Run",
            "--set-hydrant",
            "14",
            "--set-run",
            "Summit Run",
            "--watch",
            "600",
            "--map",
        ])
        .unwrap();
        assert_eq!(options.site.as_deref(), Some("Bear Mountain, CA"));
        assert_eq!(options.snowgun.as_deref(), Some("RAT-001"));
        assert_eq!(options.run.as_deref(), Some("Chair 9 Run"));
        assert_eq!(options.set_hydrant.as_deref(), Some("14"));
        assert_eq!(options.set_run.as_deref(), Some("Summit Run"));
        assert_eq!(options.watch, Some(600));
        assert!(options.map);
    }

    #[test]
    fn test_hydrant_text_is_passed_through() {
        let options = parse(&["--set-hydrant", "-3"]).unwrap();
        assert_eq!(options.set_hydrant.as_deref(), Some("-3"));
    }

    #[test]
    fn test_bad_args() {
        assert!(parse(&["--snowgun"]).is_err());
        assert!(parse(&["--watch", "soon"]).is_err());
        assert!(parse(&["--watch", "0"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["Snow Valley, CA", "Snow Summit, CA"]).is_err());
    }

    #[test]
    fn test_help() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let help = Options::command().render_help().to_string();
        assert!(help.contains("--set-hydrant"));
        assert!(help.contains("snowmaking-dashboard \"Snow Valley, CA\""));
    }
}
