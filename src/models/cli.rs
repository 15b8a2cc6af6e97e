use clap::Parser;
use std::path::PathBuf;

/// Download a random xkcd comic and publish it on the wall of a VK community.
///
/// The image is stored in a temporary directory and removed once the post
/// attempt is over.
#[derive(clap::Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Directory where the downloaded image is kept until it is posted
    #[arg(short, long, default_value = "images")]
    pub path: PathBuf,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clap_test() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }

    #[test]
    fn default_path() {
        let cli = Cli::try_parse_from(["comic-reposter"]).unwrap();
        assert_eq!(PathBuf::from("images"), cli.path);

        let cli = Cli::try_parse_from(["comic-reposter", "-p", "/tmp/comics"]).unwrap();
        assert_eq!(PathBuf::from("/tmp/comics"), cli.path);
    }

    #[test]
    fn rejects_extra_flags() {
        assert!(Cli::try_parse_from(["comic-reposter", "--retries", "3"]).is_err());
    }
}
