// tests/stage_outputs.rs

//! Properties of the resource output-path mapping shared by the parallel
//! resource stages.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use pkgflow::stages::resources::output_path_for;

#[test]
fn markdown_changes_extension_to_rtf() {
    let dest = output_path_for(Path::new("/tmp/resources"), Path::new("/res/readme.md"));
    assert_eq!(dest, Some(PathBuf::from("/tmp/resources/readme.rtf")));
}

#[test]
fn html_and_png_keep_their_names() {
    let dest = output_path_for(Path::new("/t"), Path::new("/res/welcome.html"));
    assert_eq!(dest, Some(PathBuf::from("/t/welcome.html")));

    let dest = output_path_for(Path::new("/t"), Path::new("/res/logo.png"));
    assert_eq!(dest, Some(PathBuf::from("/t/logo.png")));
}

#[test]
fn unhandled_classes_map_to_nothing() {
    assert_eq!(output_path_for(Path::new("/t"), Path::new("/res/notes.txt")), None);
    assert_eq!(output_path_for(Path::new("/t"), Path::new("/res/no_extension")), None);
}

proptest! {
    /// Distinct source files across all three resource classes never map to
    /// the same output path, which is what makes the parallel resources
    /// group race-free by construction.
    #[test]
    fn output_paths_are_injective_across_resource_classes(
        stems in prop::collection::hash_set("[a-z][a-z0-9_]{0,11}", 1..16)
    ) {
        let dest_dir = Path::new("/tmp/resources");
        let mut outputs = HashSet::new();
        let mut inputs = 0usize;

        for stem in &stems {
            for ext in ["md", "html", "png"] {
                let source = PathBuf::from(format!("/res/{stem}.{ext}"));
                let dest = output_path_for(dest_dir, &source)
                    .expect("supported classes always map");
                inputs += 1;
                outputs.insert(dest);
            }
        }

        prop_assert_eq!(outputs.len(), inputs);
    }
}
