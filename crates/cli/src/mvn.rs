use cairn_maven::{ChecksumStore, Coords, Ext};
use serde_json::json;

const UNAVAILABLE: &str = "__UNAVAILABLE__";

/// Prints coordinate info as JSON on stdout, including remote URIs and
/// live-fetched checksums.
pub fn run(input: &str) -> anyhow::Result<()> {
    let coords = Coords::parse(input)?;
    let sums = ChecksumStore::new();
    let sha1 = |ext| {
        sums.fetch(&coords, ext, true)
            .ok()
            .flatten()
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    };

    let info = json!({
        "coords": coords.to_string(),
        "groupId": coords.group,
        "artifactId": coords.artifact,
        "version": coords.version,
        "classifier": coords.classifier,
        "jar": {
            "uri": coords.remote_with(Ext::Jar),
            "sha1": sha1(Ext::JarSum),
        },
        "sources": {
            "uri": coords.remote_with(Ext::Src),
            "sha1": sha1(Ext::SrcSum),
        },
    });
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
