//! Command line dispatch for the `snippet-studio` binary.

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::manager::SnippetManager;
use crate::request::RequestOptions;

pub const USAGE: &str =
    "usage: snippet-studio languages | generate <language> <variant> <request.json>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the supported languages as JSON
    Languages,
    /// Generate a snippet for the request description in `request_file`
    Generate {
        language: String,
        variant: String,
        request_file: PathBuf,
    },
}

impl Command {
    /// Parse the arguments following the program name.
    pub fn parse(args: &[String]) -> Result<Self> {
        match args {
            [cmd] if cmd == "languages" => Ok(Self::Languages),
            [cmd, language, variant, request_file] if cmd == "generate" => Ok(Self::Generate {
                language: language.clone(),
                variant: variant.clone(),
                request_file: PathBuf::from(request_file),
            }),
            _ => bail!(USAGE),
        }
    }
}

/// Run `command` against an initialized manager, returning the text to print.
pub async fn run(manager: &SnippetManager, command: &Command) -> Result<String> {
    match command {
        Command::Languages => Ok(serde_json::to_string_pretty(&manager.get_language_list())?),
        Command::Generate {
            language,
            variant,
            request_file,
        } => {
            let options = RequestOptions::from_file(request_file)?;
            Ok(manager.generate(&options, language, variant).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_languages() {
        assert_eq!(Command::parse(&args(&["languages"])).unwrap(), Command::Languages);
    }

    #[test]
    fn test_parse_generate() {
        let command = Command::parse(&args(&["generate", "java", "OkHttp", "req.json"])).unwrap();
        assert_eq!(
            command,
            Command::Generate {
                language: "java".to_string(),
                variant: "OkHttp".to_string(),
                request_file: PathBuf::from("req.json"),
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        for bad in [
            args(&[]),
            args(&["generate", "java", "OkHttp"]),
            args(&["languages", "extra"]),
            args(&["convert", "java", "OkHttp", "req.json"]),
        ] {
            let err = Command::parse(&bad).unwrap_err();
            assert_eq!(err.to_string(), USAGE);
        }
    }
}
