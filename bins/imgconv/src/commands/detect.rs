//! Detect command - identify a file from its magic bytes

use anyhow::{Context, Result};
use imgconv_cli::output::Status;
use imgconv_image::{detect_format, Registry};
use std::io::Read;
use std::path::Path;

const SNIFF_LEN: u64 = 512;

/// Run detect command
pub fn run(path: &Path) -> Result<()> {
    let mut head = Vec::new();
    std::fs::File::open(path)
        .and_then(|file| file.take(SNIFF_LEN).read_to_end(&mut head))
        .with_context(|| format!("cannot read {}", path.display()))?;

    let by_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| Registry::global().resolve(ext));

    match detect_format(&head) {
        Some(format) => {
            println!("Format: {}", format);
            println!("MIME: {}", format.mime_type());
            println!("Extensions: {}", format.extensions().join(", "));

            match by_extension {
                Some(descriptor) if descriptor.id != format => Status::warning(&format!(
                    "extension selects {} but content is {}; conversion will fail to decode",
                    descriptor.id, format
                )),
                None => Status::warning("extension is not a known image format"),
                _ => {}
            }
            Ok(())
        }
        None => anyhow::bail!("unrecognized image content in {}", path.display()),
    }
}
