//! Overlay emoji on a photo using face descriptors from a JSON file.
//!
//! Usage:
//!   cargo run --example emojify_photo -- <photo> <faces.json> <output.png>
//!
//! The JSON file holds an array of descriptors as produced by a detector:
//! `{"bounds": {"x", "y", "width", "height"}, "headTiltAngle",
//! "smilingProbability", "leftEyeOpenProbability", "rightEyeOpenProbability"}`.

use emojify::{fit_within, Emojifier, FaceDescriptor};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("usage: {} <photo> <faces.json> <output.png>", args[0]);
        std::process::exit(2);
    }

    let photo = image::open(&args[1])
        .unwrap_or_else(|e| panic!("failed to open {}: {e}", args[1]))
        .to_rgba8();
    let json = std::fs::read_to_string(&args[2])
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", args[2]));
    let faces: Vec<FaceDescriptor> =
        serde_json::from_str(&json).expect("faces file is not a descriptor array");

    let result = Emojifier::new()
        .expect("bundled sprites failed to load")
        .overlay(&photo, &faces)
        .expect("compositing failed");

    for applied in &result.applied {
        println!(
            "  face {}: {:?} at ({:.0}, {:.0}) scale={:.2} rotation={:.1}",
            applied.index,
            applied.category,
            applied.placement.center.0,
            applied.placement.center.1,
            applied.placement.scale,
            applied.placement.rotation_degrees,
        );
    }
    for index in &result.dropped {
        println!("  face {index}: dropped (invalid descriptor)");
    }

    let preview = fit_within(&result.image, 1024, 1024).expect("viewport is non-zero");
    preview
        .save(&args[3])
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", args[3]));
    println!("Output written to {}", args[3]);
}
