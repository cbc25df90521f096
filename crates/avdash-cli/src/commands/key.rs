use avdash_core::keystore::default_store_dir;
use avdash_core::{FileKeyStore, KeyStore, API_KEY_FILE, PERSISTENT_API_KEY_FILE};

use crate::cli::{KeyArgs, KeyCommand};
use crate::error::CliError;

pub fn run(args: &KeyArgs) -> Result<(), CliError> {
    let dir = default_store_dir().ok_or_else(|| {
        CliError::Command(String::from("no config directory available on this platform"))
    })?;
    let session = FileKeyStore::plain(dir.join(API_KEY_FILE));
    let persistent = FileKeyStore::obfuscated(dir.join(PERSISTENT_API_KEY_FILE));

    match &args.command {
        KeyCommand::Set(set) => {
            // keep a single active slot so later resolution is unambiguous
            if set.persistent {
                persistent.set(&set.value);
                session.clear();
                println!("stored persistent key at {}", persistent.path().display());
            } else {
                session.set(&set.value);
                persistent.clear();
                println!("stored session key at {}", session.path().display());
            }
        }
        KeyCommand::Show => {
            if let Some(key) = session.get() {
                println!("session key ({}): {}", session.path().display(), mask(&key));
            } else if let Some(key) = persistent.get() {
                println!(
                    "persistent key ({}): {}",
                    persistent.path().display(),
                    mask(&key)
                );
            } else {
                println!("no api key stored");
            }
        }
        KeyCommand::Clear => {
            session.clear();
            persistent.clear();
            println!("cleared stored keys");
        }
    }

    Ok(())
}

fn mask(key: &str) -> String {
    if key.chars().count() <= 4 {
        return "****".to_owned();
    }
    let preview: String = key.chars().take(4).collect();
    format!("{}… ({} chars)", preview, key.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_keys_are_fully_masked() {
        assert_eq!(mask("abc"), "****");
        assert_eq!(mask("abcd"), "****");
    }

    #[test]
    fn long_keys_keep_a_four_char_preview() {
        assert_eq!(mask("ABCDEFGH"), "ABCD… (8 chars)");
    }
}
