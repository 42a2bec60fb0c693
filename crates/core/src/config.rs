//! Configuration constants and the explicit build configuration.

use std::path::{Path, PathBuf};

use crate::release::AssetMatch;

/// GitHub REST API root.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// User agent attached to every request.
pub const USER_AGENT: &str = "LXGW-JB-nerd/1.0";

/// LXGW WenKai (CJK donor) repository.
pub const LXGW_REPO: &str = "lxgw/LxgwWenKai";

/// JetBrains Mono (Latin base) repository.
pub const JETBRAINS_MONO_REPO: &str = "JetBrains/JetBrainsMono";

/// Nerd Fonts (glyph patcher) repository.
pub const NERD_FONTS_REPO: &str = "ryanoasis/nerd-fonts";

/// Asset name of the standalone patcher archive.
pub const FONT_PATCHER_ASSET: &str = "FontPatcher.zip";

/// Patcher executable, relative to the extracted patcher archive.
pub const FONT_PATCHER_EXECUTABLE: &str = "font-patcher";

/// Default glyph-editing program.
pub const FONTFORGE_PROGRAM: &str = "fontforge";

/// Default pattern used to locate outline fonts in an extracted tree.
pub const FONT_PATTERN: &str = "*.ttf";

/// Substring the patcher puts into the names of the files it writes.
pub const PATCHED_MARKER: &str = "Nerd";

/// Flags handed to the patcher before `-out <dir> <font>`.
pub const PATCHER_FLAGS: &[&str] = &["--complete", "--careful", "--quiet"];

/// Code point ranges copied from the CJK donor into the Latin base, inclusive.
pub const CJK_RANGES: &[(u32, u32)] = &[
    // CJK Symbols and Punctuation
    (0x3000, 0x303F),
    // CJK Unified Ideographs Extension A
    (0x3400, 0x4DBF),
    // CJK Unified Ideographs
    (0x4E00, 0x9FFF),
];

/// Identification written into the merged font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedNaming {
    pub family_name: String,
    pub full_name: String,
    pub font_name: String,
    pub file_name: String,
}

impl Default for MergedNaming {
    fn default() -> Self {
        Self {
            family_name: "LXGW JB".to_string(),
            full_name: "LXGW JB Mono".to_string(),
            font_name: "LXGWJB-Mono".to_string(),
            file_name: "LXGWJB-Mono-Regular.ttf".to_string(),
        }
    }
}

/// How the preferred (Regular) face of a family is recognised by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontPreference {
    /// Every substring must occur in the file name.
    pub name_contains: Vec<String>,
    /// Required name of the directory holding the file.
    pub parent_dir: Option<String>,
}

impl FontPreference {
    pub fn new(name_contains: &[&str]) -> Self {
        Self {
            name_contains: name_contains.iter().map(|s| s.to_string()).collect(),
            parent_dir: None,
        }
    }

    pub fn in_dir(mut self, dir: &str) -> Self {
        self.parent_dir = Some(dir.to_string());
        self
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            return false;
        };
        if !self.name_contains.iter().all(|needle| name.contains(needle.as_str())) {
            return false;
        }
        match &self.parent_dir {
            Some(dir) => path
                .parent()
                .and_then(Path::file_name)
                .and_then(|s| s.to_str())
                .is_some_and(|parent| parent == dir),
            None => true,
        }
    }
}

/// One upstream release to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    /// Human readable name used in progress output.
    pub label: String,
    /// `owner/name` repository identifier.
    pub repo: String,
    pub asset: AssetMatch,
    pub font: FontPreference,
}

/// Everything a build needs to know, passed explicitly into the pipeline.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub work_dir: PathBuf,
    pub output_dir: PathBuf,
    /// CJK donor font source.
    pub cjk: SourceSpec,
    /// Latin base font source.
    pub latin: SourceSpec,
    /// Glyph patcher source.
    pub patcher: SourceSpec,
    pub naming: MergedNaming,
    pub fontforge: PathBuf,
    pub patcher_executable: PathBuf,
    pub font_pattern: String,
}

impl BuildConfig {
    pub fn new(work_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            output_dir: output_dir.into(),
            cjk: SourceSpec {
                label: "LXGW WenKai".to_string(),
                repo: LXGW_REPO.to_string(),
                asset: AssetMatch::pattern("lxgw-wenkai-", ".tar.gz"),
                font: FontPreference::new(&["Regular", "Mono"]),
            },
            latin: SourceSpec {
                label: "JetBrains Mono".to_string(),
                repo: JETBRAINS_MONO_REPO.to_string(),
                asset: AssetMatch::pattern("JetBrainsMono-", ".zip"),
                font: FontPreference::new(&["Regular"]).in_dir("ttf"),
            },
            patcher: SourceSpec {
                label: "Nerd Fonts".to_string(),
                repo: NERD_FONTS_REPO.to_string(),
                asset: AssetMatch::exact(FONT_PATCHER_ASSET),
                font: FontPreference::default(),
            },
            naming: MergedNaming::default(),
            fontforge: PathBuf::from(FONTFORGE_PROGRAM),
            patcher_executable: PathBuf::from(FONT_PATCHER_EXECUTABLE),
            font_pattern: FONT_PATTERN.to_string(),
        }
    }

    pub fn with_fontforge(mut self, program: impl Into<PathBuf>) -> Self {
        self.fontforge = program.into();
        self
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.work_dir.join("downloads")
    }

    pub fn extracts_dir(&self) -> PathBuf {
        self.work_dir.join("extracts")
    }

    pub fn cjk_extract_dir(&self) -> PathBuf {
        self.extracts_dir().join("lxgw")
    }

    pub fn latin_extract_dir(&self) -> PathBuf {
        self.extracts_dir().join("jetbrains")
    }

    pub fn patcher_dir(&self) -> PathBuf {
        self.work_dir.join("FontPatcher")
    }

    pub fn merged_dir(&self) -> PathBuf {
        self.work_dir.join("merged")
    }

    pub fn patched_dir(&self) -> PathBuf {
        self.work_dir.join("patched")
    }

    pub fn merged_font(&self) -> PathBuf {
        self.merged_dir().join(&self.naming.file_name)
    }

    /// Every directory the pipeline writes into.
    pub fn all_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.work_dir.clone(),
            self.downloads_dir(),
            self.extracts_dir(),
            self.merged_dir(),
            self.patched_dir(),
            self.output_dir.clone(),
        ]
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new("work", "output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = BuildConfig::new("/tmp/w", "/tmp/o");
        assert_eq!(config.downloads_dir(), PathBuf::from("/tmp/w/downloads"));
        assert_eq!(config.cjk_extract_dir(), PathBuf::from("/tmp/w/extracts/lxgw"));
        assert_eq!(config.latin_extract_dir(), PathBuf::from("/tmp/w/extracts/jetbrains"));
        assert_eq!(config.patcher_dir(), PathBuf::from("/tmp/w/FontPatcher"));
        assert_eq!(
            config.merged_font(),
            PathBuf::from("/tmp/w/merged/LXGWJB-Mono-Regular.ttf")
        );
    }

    #[test]
    fn test_preference_name_substrings() {
        let pref = FontPreference::new(&["Regular", "Mono"]);
        assert!(pref.matches(Path::new("a/LXGWWenKaiMono-Regular.ttf")));
        assert!(!pref.matches(Path::new("a/LXGWWenKai-Regular.ttf")));
        assert!(!pref.matches(Path::new("a/LXGWWenKaiMono-Bold.ttf")));
    }

    #[test]
    fn test_preference_parent_dir() {
        let pref = FontPreference::new(&["Regular"]).in_dir("ttf");
        assert!(pref.matches(Path::new("fonts/ttf/JetBrainsMono-Regular.ttf")));
        assert!(!pref.matches(Path::new("fonts/variable/JetBrainsMono-Regular.ttf")));
        assert!(!pref.matches(Path::new("JetBrainsMono-Regular.ttf")));
    }

    #[test]
    fn test_ranges_are_ordered() {
        for (start, end) in CJK_RANGES {
            assert!(start <= end);
        }
        assert_eq!(CJK_RANGES.len(), 3);
    }
}
