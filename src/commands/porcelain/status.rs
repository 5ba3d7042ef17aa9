use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::FileSet;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let status = self.status_info()?;
        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in &status.branches {
            if *branch == status.current_branch {
                writeln!(writer, "*{}", branch)?;
            } else {
                writeln!(writer, "{}", branch)?;
            }
        }
        writeln!(writer)?;

        let sections: [(&str, &FileSet); 3] = [
            ("Staged Files", &status.staged_files),
            ("Removed Files", &status.removed_files),
            ("Untracked Files", &status.untracked_files),
        ];
        for (title, files) in sections {
            writeln!(writer, "=== {} ===", title)?;
            for file in files {
                writeln!(writer, "{}", file.display())?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}
