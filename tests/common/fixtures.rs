//! Reusable test content

use flate2::write::GzEncoder;
use flate2::Compression;

/// Manifest with `a` everywhere (required as `a`) and `b` in `test` only
pub const SCENARIO_DEPENDENCIES: &str = r#"
[[dependencies]]
name = "a"
require = ["a"]

[[dependencies]]
name = "b"
only = ["test"]
"#;

/// Gzip tarball holding `lib/<name>.rb` and optionally `exe/<executable>`
pub fn package_archive(name: &str, executable: Option<&str>) -> Vec<u8> {
    let mut files = vec![(format!("lib/{name}.rb"), format!("# {name}\n"))];
    if let Some(exe) = executable {
        files.push((format!("exe/{exe}"), "#!/bin/sh\necho ok\n".to_string()));
    }

    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, content) in &files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, path, content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}
