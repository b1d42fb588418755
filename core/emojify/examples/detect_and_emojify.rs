//! Detect faces with the SeetaFace backend and overlay emoji.
//!
//! Usage:
//!   cargo run --example detect_and_emojify --features rustface -- <model.bin> <photo> <output.png>

use emojify::{Emojifier, RustfaceDetector};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("usage: {} <model.bin> <photo> <output.png>", args[0]);
        std::process::exit(2);
    }

    let detector = RustfaceDetector::from_model_file(&args[1]).expect("failed to load model");
    let photo = image::open(&args[2])
        .unwrap_or_else(|e| panic!("failed to open {}: {e}", args[2]))
        .to_rgba8();

    let result = Emojifier::new()
        .expect("bundled sprites failed to load")
        .detect_and_overlay(&photo, &detector)
        .expect("compositing failed");

    if result.applied.is_empty() {
        println!("  NO FACES DETECTED");
    } else {
        println!("  Found {} face(s):", result.applied.len());
        for applied in &result.applied {
            println!(
                "    face {}: center=({:.0}, {:.0}), scale={:.2}",
                applied.index,
                applied.placement.center.0,
                applied.placement.center.1,
                applied.placement.scale,
            );
        }
    }

    result
        .image
        .save(&args[3])
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", args[3]));
}
