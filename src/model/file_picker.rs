use std::path::{Path, PathBuf};

use crate::loader::{self, LoadKind};
use crate::shared::PadId;

// stand-in for the browser's file dialog: a flat list of matching files in one directory
#[derive(Clone, Debug, PartialEq)]
pub struct FilePicker {
    pub pad: PadId,
    pub kind: LoadKind,
    pub dir: PathBuf,
    pub entries: Vec<PathBuf>,
    pub selected: usize,
}

impl FilePicker {
    pub fn open(pad: PadId, kind: LoadKind, dir: &Path) -> std::io::Result<Self> {
        let entries = loader::index_files_in_dir(dir, kind.extensions())?;
        Ok(Self {
            pad,
            kind,
            dir: dir.to_path_buf(),
            entries,
            selected: 0,
        })
    }

    pub fn move_down(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1) % self.entries.len();
        }
    }

    pub fn move_up(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + self.entries.len() - 1) % self.entries.len();
        }
    }

    pub fn path_at(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(PathBuf::as_path)
    }

    #[cfg(test)]
    pub fn selected_path(&self) -> Option<&Path> {
        self.path_at(self.selected)
    }

    pub fn title(&self) -> String {
        format!("{} for {} ({})", self.kind.label(), self.pad, self.dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_only_matching_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.wav", "a.WAV", "notes.txt", "c.png"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let pad = PadId::new(0, 0).unwrap();

        let mut picker = FilePicker::open(pad, LoadKind::Sample, dir.path()).unwrap();
        let names: Vec<_> = picker
            .entries
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.WAV", "b.wav"]);

        picker.move_up();
        assert_eq!(picker.selected_path().unwrap().file_name().unwrap(), "b.wav");
        picker.move_down();
        assert_eq!(picker.selected, 0);

        let images = FilePicker::open(pad, LoadKind::Image, dir.path()).unwrap();
        assert_eq!(images.entries.len(), 1);
    }

    #[test]
    fn empty_directory_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let mut picker = FilePicker::open(PadId::new(1, 1).unwrap(), LoadKind::Image, dir.path()).unwrap();
        picker.move_down();
        picker.move_up();
        assert!(picker.selected_path().is_none());
    }
}
