//! MLOD CLI - Tool for inspecting and round-tripping MLOD P3D files.

use mlod::p3d::{Document, Lod, Tag};
use mlod::util::Vec3;
use rayon::prelude::*;
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut level = "info";
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => level = "debug",
            "-vv" | "--trace" => level = "trace",
            "-q" | "--quiet" => level = "error",
            "-V" | "--version" => {
                print_version();
                return;
            }
            _ => filtered_args.push(arg),
        }
    }

    init_logging(level);

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    match filtered_args[0] {
        // Info command - header and per-LOD summary
        "info" | "i" => {
            if filtered_args.len() < 2 {
                eprintln!("Error: missing file argument");
                eprintln!("Usage: mlod info <file.p3d>");
                std::process::exit(1);
            }
            cmd_info(filtered_args[1]);
        }

        // Tags command - tag streams with decoded #Property#/#Mass#
        "tags" | "t" => {
            if filtered_args.len() < 2 {
                eprintln!("Error: missing file argument");
                eprintln!("Usage: mlod tags <file.p3d> [lod]");
                std::process::exit(1);
            }
            let lod_filter = match filtered_args.get(2).map(|s| s.parse::<usize>()) {
                None => None,
                Some(Ok(index)) => Some(index),
                Some(Err(_)) => {
                    eprintln!("Error: LOD index must be a number");
                    std::process::exit(1);
                }
            };
            cmd_tags(filtered_args[1], lod_filter);
        }

        // Dump command - full structure
        "dump" | "d" => {
            if filtered_args.len() < 2 {
                eprintln!("Error: missing file argument");
                eprintln!("Usage: mlod dump <file.p3d> [--json]");
                std::process::exit(1);
            }
            let json_mode = filtered_args.iter().any(|&s| s == "--json" || s == "-j");
            cmd_dump(filtered_args[1], json_mode);
        }

        // Copy command - decode then re-encode
        "copy" | "c" => {
            if filtered_args.len() < 3 {
                eprintln!("Error: missing arguments");
                eprintln!("Usage: mlod copy <input.p3d> <output.p3d>");
                std::process::exit(1);
            }
            cmd_copy(filtered_args[1], filtered_args[2]);
        }

        // Check command - parallel round-trip verification
        "check" | "k" => {
            if filtered_args.len() < 2 {
                eprintln!("Error: missing file arguments");
                eprintln!("Usage: mlod check <file.p3d>...");
                std::process::exit(1);
            }
            cmd_check(&filtered_args[1..]);
        }

        // Help
        "help" | "h" | "-h" | "--help" => print_help(),

        // Default: if file exists, show info; otherwise error
        _ => {
            if Path::new(filtered_args[0]).exists() {
                cmd_info(filtered_args[0]);
            } else {
                eprintln!("Unknown command: {}", filtered_args[0]);
                eprintln!();
                print_help();
                std::process::exit(1);
            }
        }
    }
}

/// Install the fmt subscriber. `RUST_LOG` overrides the flag-selected level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn print_version() {
    let date = option_env!("MLOD_BUILD_DATE").unwrap_or("unknown");
    let time = option_env!("MLOD_BUILD_TIME").unwrap_or("unknown");
    println!("mlod {} (built {} {})", env!("CARGO_PKG_VERSION"), date, time);
}

fn print_help() {
    println!("mlod - MLOD P3D file toolkit");
    println!();
    println!("USAGE:");
    println!("    mlod [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    i, info   <file>              Show header and LOD summary");
    println!("    t, tags   <file> [lod]        List tags (optionally of one LOD)");
    println!("    d, dump   <file> [--json]     Dump full LOD structure");
    println!("    c, copy   <in> <out>          Decode and re-encode to a new file");
    println!("    k, check  <files...>          Verify byte-exact round trip (parallel)");
    println!("    h, help                       Show this help");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Show debug output");
    println!("    -vv, --trace     Show trace output (very verbose)");
    println!("    -q, --quiet      Only show errors");
    println!("    -V, --version    Show version");
    println!();
    println!("EXAMPLES:");
    println!("    mlod info house.p3d                   # Quick overview");
    println!("    mlod tags house.p3d 0                 # Tags of the first LOD");
    println!("    mlod dump house.p3d --json            # Export structure as JSON");
    println!("    mlod copy house.p3d house_out.p3d     # Test round-trip");
    println!("    mlod check models/*.p3d               # Verify many files");
    println!();
    println!("NOTES:");
    println!("    - Passing a .p3d file directly is equivalent to 'info'");
    println!("    - RUST_LOG overrides -v/-vv/-q");
}

fn open_or_exit(path: &str) -> Document {
    tracing::info!("Opening model: {}", path);
    match Document::open(path) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Failed to open {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn cmd_info(path: &str) {
    let doc = open_or_exit(path);

    println!("Model: {}", path);
    println!("Signature: {}", doc.signature_str());
    println!("Version: {:#x}", doc.version);
    println!("LODs: {}", doc.lods.len());
    println!();

    let mut total_points = 0;
    let mut total_faces = 0;
    for (i, lod) in doc.lods.iter().enumerate() {
        total_points += lod.num_points();
        total_faces += lod.num_faces();
        println!(
            "  [{:>2}] {} v{}.{} res={:<10} points={:<6} normals={:<6} faces={:<6} tags={}",
            i,
            lod.signature_str(),
            lod.major_version,
            lod.minor_version,
            lod.resolution,
            lod.num_points(),
            lod.num_face_normals(),
            lod.num_faces(),
            lod.tags.len()
        );
    }
    println!();
    println!("Total: {} points, {} faces", total_points, total_faces);
}

fn cmd_tags(path: &str, lod_filter: Option<usize>) {
    let doc = open_or_exit(path);

    if let Some(index) = lod_filter {
        if index >= doc.lods.len() {
            eprintln!("LOD index {} out of bounds (count: {})", index, doc.lods.len());
            std::process::exit(1);
        }
    }

    for (i, lod) in doc.lods.iter().enumerate() {
        if lod_filter.is_some_and(|index| index != i) {
            continue;
        }
        println!("LOD {} (res={}) - {} tags", i, lod.resolution, lod.tags.len());
        for tag in &lod.tags {
            print_tag(lod, tag);
        }
        println!();
    }
}

fn print_tag(lod: &Lod, tag: &Tag) {
    let marker = if tag.is_active() { ' ' } else { '-' };
    if let Some(prop) = tag.as_property() {
        println!("  {}{} {} = {}", marker, tag.name, prop.key_str(), prop.value_str());
    } else if let Some(mass) = tag.as_mass(lod.num_points()) {
        println!("  {}{} {} values, total {}", marker, tag.name, mass.mass.len(), mass.total());
    } else {
        println!("  {}{} ({} bytes)", marker, tag.name, tag.data_length());
    }
}

fn cmd_dump(path: &str, json_mode: bool) {
    let doc = open_or_exit(path);

    if json_mode {
        let lods: Vec<serde_json::Value> = doc.lods.iter().map(lod_to_json).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "model": path,
                "signature": doc.signature_str(),
                "version": doc.version,
                "lods": lods
            }))
            .unwrap_or_default()
        );
        return;
    }

    println!("Model: {}", path);
    for (i, lod) in doc.lods.iter().enumerate() {
        println!();
        println!(
            "LOD {} [{}] res={} flags={:#x}",
            i,
            lod.signature_str(),
            lod.resolution,
            lod.flags
        );
        println!("  points ({}):", lod.num_points());
        for (p, point) in lod.points.iter().enumerate() {
            println!("    [{p}] {} flags={:#x}", fmt_vec3(point.position), point.flags);
        }
        println!("  normals ({}):", lod.num_face_normals());
        for (n, normal) in lod.normals.iter().enumerate() {
            println!("    [{n}] {}", fmt_vec3(*normal));
        }
        println!("  faces ({}):", lod.num_faces());
        for (f, face) in lod.faces.iter().enumerate() {
            let corners: Vec<String> = face
                .vertices
                .iter()
                .map(|v| format!("{}/{} ({:.3}, {:.3})", v.point_index, v.normal_index, v.u, v.v))
                .collect();
            println!(
                "    [{f}] type={} flags={:#x} tex='{}' mat='{}'",
                face.face_type, face.face_flags, face.texture_name, face.material_name
            );
            println!("         {}", corners.join("  "));
        }
        println!("  tags ({}):", lod.tags.len());
        for tag in &lod.tags {
            print_tag(lod, tag);
        }
    }
}

fn fmt_vec3(v: Vec3) -> String {
    format!("({:.4}, {:.4}, {:.4})", v.x, v.y, v.z)
}

fn lod_to_json(lod: &Lod) -> serde_json::Value {
    let points: Vec<serde_json::Value> = lod
        .points
        .iter()
        .map(|p| serde_json::json!({ "position": p.position.to_array(), "flags": p.flags }))
        .collect();
    let normals: Vec<[f32; 3]> = lod.normals.iter().map(|n| n.to_array()).collect();
    let faces: Vec<serde_json::Value> = lod
        .faces
        .iter()
        .map(|f| {
            let vertices: Vec<serde_json::Value> = f
                .vertices
                .iter()
                .map(|v| {
                    serde_json::json!({
                        "point": v.point_index,
                        "normal": v.normal_index,
                        "uv": [v.u, v.v]
                    })
                })
                .collect();
            serde_json::json!({
                "type": f.face_type,
                "flags": f.face_flags,
                "texture": f.texture_name.to_string(),
                "material": f.material_name.to_string(),
                "vertices": vertices
            })
        })
        .collect();
    let tags: Vec<serde_json::Value> = lod
        .tags
        .iter()
        .map(|t| {
            serde_json::json!({
                "name": t.name.to_string(),
                "active": t.active,
                "length": t.data_length()
            })
        })
        .collect();
    let properties: Vec<serde_json::Value> = lod
        .property_tags()
        .map(|p| serde_json::json!({ "key": p.key_str(), "value": p.value_str() }))
        .collect();

    serde_json::json!({
        "signature": lod.signature_str(),
        "version": [lod.major_version, lod.minor_version],
        "flags": lod.flags,
        "resolution": lod.resolution,
        "points": points,
        "normals": normals,
        "faces": faces,
        "tags": tags,
        "properties": properties,
        "mass": lod.mass().map(|m| m.mass)
    })
}

fn cmd_copy(input: &str, output: &str) {
    let original = match std::fs::read(input) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input, e);
            std::process::exit(1);
        }
    };

    let doc = match mlod::decode(&original) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Failed to decode {}: {}", input, e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Decoded {} LODs", doc.lods.len());

    let encoded = mlod::encode(&doc);
    if let Err(e) = std::fs::write(output, &encoded) {
        eprintln!("Failed to write {}: {}", output, e);
        std::process::exit(1);
    }

    println!("Wrote {} ({} bytes)", output, encoded.len());
    if encoded == original {
        println!("Round trip: identical");
    } else {
        println!(
            "Round trip: DIFFERS (input {} bytes, output {} bytes, first difference at {})",
            original.len(),
            encoded.len(),
            first_difference(&original, &encoded)
        );
        std::process::exit(1);
    }
}

fn first_difference(a: &[u8], b: &[u8]) -> usize {
    a.iter()
        .zip(b.iter())
        .position(|(x, y)| x != y)
        .unwrap_or_else(|| a.len().min(b.len()))
}

/// Outcome of a single-file round trip.
enum CheckResult {
    Identical,
    Differs(usize),
    Failed(String),
}

fn check_file(path: &str) -> CheckResult {
    let original = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return CheckResult::Failed(e.to_string()),
    };
    match mlod::decode(&original) {
        Ok(doc) => {
            let encoded = mlod::encode(&doc);
            if encoded == original {
                CheckResult::Identical
            } else {
                CheckResult::Differs(first_difference(&original, &encoded))
            }
        }
        Err(e) => CheckResult::Failed(e.to_string()),
    }
}

fn cmd_check(paths: &[&str]) {
    let results: Vec<(&str, CheckResult)> = paths
        .par_iter()
        .map(|&path| (path, check_file(path)))
        .collect();

    let mut failures = 0;
    for (path, result) in &results {
        match result {
            CheckResult::Identical => println!("OK    {}", path),
            CheckResult::Differs(offset) => {
                failures += 1;
                println!("DIFF  {} (first difference at byte {})", path, offset);
            }
            CheckResult::Failed(msg) => {
                failures += 1;
                println!("FAIL  {}: {}", path, msg);
            }
        }
    }

    println!();
    println!("{} files, {} passed, {} failed", results.len(), results.len() - failures, failures);
    if failures > 0 {
        std::process::exit(1);
    }
}
