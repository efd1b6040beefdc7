use rustc_version::{Channel, version_meta};

fn main() {
    println!("cargo::rustc-check-cfg=cfg(CHANNEL_NIGHTLY)");

    // docs.rs builds on nightly, which is where doc_auto_cfg is available:
    if matches!(version_meta(), Ok(meta) if meta.channel == Channel::Nightly) {
        println!("cargo:rustc-cfg=CHANNEL_NIGHTLY");
    }
}
