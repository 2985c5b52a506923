// 🖥️ Text Menu - prompt loop driving the library
//
// Every store error is turned into a message and control returns to the
// main menu. Only "exit" or end of input leaves the loop.

use crate::entry::{Entry, EntryUpdate};
use crate::error::VocabError;
use crate::export::{self, ExportFormat};
use crate::library::{Library, Persisted};
use crate::persistence::{Snapshot, SnapshotStore};
use crate::speech::{speech_text, SpeakMode, Speaker};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const RULE: usize = 50;

pub struct Menu<'a, S: SnapshotStore, R: BufRead, W: Write> {
    library: &'a mut Library<S>,
    speaker: &'a dyn Speaker,
    input: R,
    out: W,
    export_dir: PathBuf,
}

impl<'a, S: SnapshotStore, R: BufRead, W: Write> Menu<'a, S, R, W> {
    pub fn new(library: &'a mut Library<S>, speaker: &'a dyn Speaker, input: R, out: W) -> Self {
        Menu {
            library,
            speaker,
            input,
            out,
            export_dir: PathBuf::from("."),
        }
    }

    /// Directory that exports are written into
    pub fn with_export_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.export_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "📚 Welcome to code-vocab v{}!", crate::VERSION)?;
        if !self.speaker.available() {
            writeln!(self.out, "ℹ️  Text-to-speech is unavailable; speaking is disabled")?;
        }

        match self.main_loop() {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                writeln!(self.out, "\n👋 Bye!")?;
                Ok(())
            }
            other => other,
        }
    }

    fn main_loop(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let choice = self.ask("Choose an option (1-7): ")?;
            match choice.as_str() {
                "1" => self.view_entries()?,
                "2" => self.add_entry()?,
                "3" => self.edit_or_delete()?,
                "4" => self.speak_entry()?,
                "5" => self.manage_categories()?,
                "6" => self.manage_data()?,
                "7" => {
                    writeln!(self.out, "👋 Bye!")?;
                    return Ok(());
                }
                _ => writeln!(self.out, "❌ Invalid choice, enter a number from 1 to 7")?,
            }
            self.ask("\nPress Enter to continue...")?;
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        let bar = "=".repeat(60);
        writeln!(self.out, "\n{}", bar)?;
        writeln!(self.out, "📚 Programming Vocabulary")?;
        writeln!(self.out, "{}", bar)?;
        writeln!(
            self.out,
            "Entries: {} | Categories: {}",
            self.library.len(),
            self.library.store().category_count()
        )?;
        writeln!(self.out, "{}", bar)?;
        writeln!(self.out, "1. 📖 View entries (by category / search / all)")?;
        writeln!(self.out, "2. 📝 Add entry")?;
        writeln!(self.out, "3. ✏️  Edit / delete entry")?;
        writeln!(self.out, "4. 🔊 Speak entry")?;
        writeln!(self.out, "5. 🏷️  Manage categories")?;
        writeln!(self.out, "6. 💾 Export / import / clear")?;
        writeln!(self.out, "7. 🚪 Exit")?;
        writeln!(self.out, "{}", bar)
    }

    // ========================================================================
    // INPUT HELPERS
    // ========================================================================

    /// Prompt and read one trimmed line; end of input is `UnexpectedEof`
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Affirmative only on `y`/`Y`
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{} (y/N): ", prompt))?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }

    /// Ask for a 1-based entry number and map it to a 0-based index
    fn pick_entry(&mut self, prompt_verb: &str) -> io::Result<Option<usize>> {
        for (i, entry) in self.library.list_all().iter().enumerate() {
            writeln!(self.out, "{}. {} ({})", i + 1, entry.content, entry.category)?;
        }
        let len = self.library.len();
        let raw = self.ask(&format!("\nChoose an entry to {} (1-{}): ", prompt_verb, len))?;
        match raw.parse::<usize>() {
            Ok(n) if n >= 1 && n <= len => Ok(Some(n - 1)),
            Ok(_) => {
                writeln!(self.out, "❌ Invalid choice")?;
                Ok(None)
            }
            Err(_) => {
                writeln!(self.out, "❌ Please enter a valid number")?;
                Ok(None)
            }
        }
    }

    fn error(&mut self, err: &VocabError) -> io::Result<()> {
        writeln!(self.out, "❌ {}", err)
    }

    fn report_save<T>(&mut self, outcome: &Persisted<T>) -> io::Result<()> {
        match &outcome.save_error {
            None => writeln!(self.out, "✅ Saved"),
            Some(e) => writeln!(self.out, "⚠️  {} (changes kept in memory)", e),
        }
    }

    fn section(&mut self, title: &str) -> io::Result<()> {
        let bar = "=".repeat(RULE);
        writeln!(self.out, "\n{}\n{}\n{}", bar, title, bar)
    }

    fn category_hint(&mut self) -> io::Result<()> {
        let labels: Vec<&str> = self.library.store().categories().collect();
        writeln!(self.out, "\nCategories: {}", labels.join(", "))
    }

    fn display_entries(&mut self, entries: &[Entry]) -> io::Result<()> {
        for (i, entry) in entries.iter().enumerate() {
            display_entry(&mut self.out, entry, i + 1)?;
        }
        Ok(())
    }

    // ========================================================================
    // VIEW
    // ========================================================================

    fn view_entries(&mut self) -> io::Result<()> {
        self.section("📖 View entries")?;
        if self.library.is_empty() {
            return writeln!(self.out, "📝 The vocabulary is empty, add some entries first");
        }

        writeln!(self.out, "1. By category")?;
        writeln!(self.out, "2. Search by keyword")?;
        writeln!(self.out, "3. All entries")?;
        match self.ask("Choose (1-3): ")?.as_str() {
            "1" => self.view_by_category(),
            "2" => self.search_entries(),
            "3" => self.view_all(),
            _ => writeln!(self.out, "❌ Invalid choice"),
        }
    }

    fn view_by_category(&mut self) -> io::Result<()> {
        self.category_hint()?;
        let category = self.ask("Category to view: ")?;

        let found = self
            .library
            .list_by_category(&category)
            .map(|entries| entries.into_iter().cloned().collect::<Vec<Entry>>());
        let found = match found {
            Ok(entries) => entries,
            Err(e) => return self.error(&e),
        };
        if found.is_empty() {
            return writeln!(self.out, "📝 No entries in '{}'", category);
        }
        writeln!(self.out, "\n📚 Entries in '{}':", category)?;
        self.display_entries(&found)
    }

    fn search_entries(&mut self) -> io::Result<()> {
        let keyword = self.ask("Keyword: ")?;

        let found = self
            .library
            .search(&keyword)
            .map(|entries| entries.into_iter().cloned().collect::<Vec<Entry>>());
        let found = match found {
            Ok(entries) => entries,
            Err(e) => return self.error(&e),
        };
        if found.is_empty() {
            return writeln!(self.out, "🔍 Nothing matches '{}'", keyword);
        }
        writeln!(self.out, "\n🔍 {} matching entries:", found.len())?;
        self.display_entries(&found)
    }

    fn view_all(&mut self) -> io::Result<()> {
        let all = self.library.list_all().to_vec();
        writeln!(self.out, "\n📚 All entries ({}):", all.len())?;
        self.display_entries(&all)
    }

    // ========================================================================
    // ADD / EDIT / DELETE
    // ========================================================================

    fn add_entry(&mut self) -> io::Result<()> {
        self.section("📝 Add entry")?;

        let content = self.ask("Term (e.g. for loop): ")?;
        if content.is_empty() {
            return self.error(&VocabError::EmptyField("content"));
        }
        self.category_hint()?;
        let category = self.ask("Category (a new name creates it): ")?;
        if category.is_empty() {
            return self.error(&VocabError::EmptyField("category"));
        }
        let explanation = self.ask("Explanation: ")?;
        let example = self.ask("Example: ")?;
        let pronunciation = self.ask("Pronunciation hint (optional): ")?;

        match self
            .library
            .add(&content, &category, &explanation, &example, &pronunciation)
        {
            Ok(outcome) => {
                writeln!(self.out, "✅ Added '{}'", outcome.value.content)?;
                self.report_save(&outcome)
            }
            Err(e) => self.error(&e),
        }
    }

    fn edit_or_delete(&mut self) -> io::Result<()> {
        self.section("✏️  Edit / delete entry")?;
        if self.library.is_empty() {
            return writeln!(self.out, "📝 The vocabulary is empty");
        }

        let Some(index) = self.pick_entry("change")? else {
            return Ok(());
        };
        let content = self.library.list_all()[index].content.clone();
        writeln!(self.out, "\nSelected: {}", content)?;
        writeln!(self.out, "1. Edit")?;
        writeln!(self.out, "2. Delete")?;
        match self.ask("Choose (1-2): ")?.as_str() {
            "1" => self.edit_entry(index),
            "2" => self.delete_entry(index),
            _ => writeln!(self.out, "❌ Invalid choice"),
        }
    }

    fn edit_entry(&mut self, index: usize) -> io::Result<()> {
        let current = self.library.list_all()[index].clone();
        writeln!(self.out, "\nLeave a field blank to keep its current value")?;

        let content = self.ask(&format!("Term (now: {}): ", current.content))?;
        self.category_hint()?;
        let category = self.ask(&format!("Category (now: {}): ", current.category))?;
        let explanation = self.ask(&format!("Explanation (now: {}): ", current.explanation))?;
        let example = self.ask(&format!("Example (now: {}): ", current.example))?;
        let pronunciation =
            self.ask(&format!("Pronunciation (now: {}): ", current.pronunciation))?;

        let update = EntryUpdate {
            content: Some(content),
            category: Some(category),
            explanation: Some(explanation),
            example: Some(example),
            pronunciation: Some(pronunciation),
        };
        match self.library.edit(index, &update) {
            Ok(outcome) => {
                writeln!(self.out, "✅ Updated '{}'", outcome.value.content)?;
                self.report_save(&outcome)
            }
            Err(e) => self.error(&e),
        }
    }

    fn delete_entry(&mut self, index: usize) -> io::Result<()> {
        let content = self.library.list_all()[index].content.clone();
        if !self.confirm(&format!("Delete '{}'?", content))? {
            return writeln!(self.out, "❌ Cancelled");
        }
        match self.library.delete(index) {
            Ok(outcome) => {
                writeln!(self.out, "✅ Deleted '{}'", outcome.value.content)?;
                self.report_save(&outcome)
            }
            Err(e) => self.error(&e),
        }
    }

    // ========================================================================
    // SPEECH
    // ========================================================================

    fn speak_entry(&mut self) -> io::Result<()> {
        if !self.speaker.available() {
            return self.error(&VocabError::SpeechUnavailable);
        }
        self.section("🔊 Speak entry")?;
        if self.library.is_empty() {
            return writeln!(self.out, "📝 The vocabulary is empty");
        }

        let Some(index) = self.pick_entry("speak")? else {
            return Ok(());
        };
        writeln!(self.out, "1. Term only")?;
        writeln!(self.out, "2. Term and explanation")?;
        let mode = match self.ask("Choose (1-2): ")?.as_str() {
            "1" => SpeakMode::ContentOnly,
            "2" => SpeakMode::Full,
            _ => return writeln!(self.out, "❌ Invalid choice"),
        };

        let text = speech_text(&self.library.list_all()[index], mode);
        writeln!(self.out, "🔊 Speaking: {}", text)?;
        match self.speaker.speak(&text) {
            Ok(()) => writeln!(self.out, "✅ Done"),
            Err(e) => writeln!(self.out, "⚠️  {}", e),
        }
    }

    // ========================================================================
    // CATEGORIES
    // ========================================================================

    fn manage_categories(&mut self) -> io::Result<()> {
        self.section("🏷️  Manage categories")?;
        writeln!(self.out, "1. List categories")?;
        writeln!(self.out, "2. Add category")?;
        writeln!(self.out, "3. Remove category")?;
        match self.ask("Choose (1-3): ")?.as_str() {
            "1" => self.list_categories(),
            "2" => self.add_category(),
            "3" => self.remove_category(),
            _ => writeln!(self.out, "❌ Invalid choice"),
        }
    }

    fn list_categories(&mut self) -> io::Result<()> {
        let categories = self.library.list_categories();
        writeln!(self.out, "\n📚 {} categories:", categories.len())?;
        for (i, (label, count)) in categories.iter().enumerate() {
            writeln!(self.out, "{}. {} ({} entries)", i + 1, label, count)?;
        }
        Ok(())
    }

    fn add_category(&mut self) -> io::Result<()> {
        let label = self.ask("New category name: ")?;
        match self.library.add_category(&label) {
            Ok(outcome) => {
                writeln!(self.out, "✅ Added category '{}'", outcome.value)?;
                self.report_save(&outcome)
            }
            Err(e) => self.error(&e),
        }
    }

    fn remove_category(&mut self) -> io::Result<()> {
        self.category_hint()?;
        let label = self.ask("Category to remove: ")?;

        // Refusals are reported before asking for confirmation
        let store = self.library.store();
        if !store.contains_category(&label) {
            return self.error(&VocabError::NotFound(label));
        }
        let count = store.count_in_category(&label);
        if count > 0 {
            return self.error(&VocabError::InUse { label, count });
        }

        if !self.confirm(&format!("Remove category '{}'?", label))? {
            return writeln!(self.out, "❌ Cancelled");
        }
        match self.library.remove_category(&label) {
            Ok(outcome) => {
                writeln!(self.out, "✅ Removed category '{}'", outcome.value)?;
                self.report_save(&outcome)
            }
            Err(e) => self.error(&e),
        }
    }

    // ========================================================================
    // EXPORT / IMPORT / CLEAR
    // ========================================================================

    fn manage_data(&mut self) -> io::Result<()> {
        self.section("💾 Export / import / clear")?;
        writeln!(self.out, "1. Export")?;
        writeln!(self.out, "2. Import snapshot (replaces everything)")?;
        writeln!(self.out, "3. Clear all data")?;
        match self.ask("Choose (1-3): ")?.as_str() {
            "1" => self.export(),
            "2" => self.import(),
            "3" => self.clear(),
            _ => writeln!(self.out, "❌ Invalid choice"),
        }
    }

    fn export(&mut self) -> io::Result<()> {
        writeln!(self.out, "1. JSON  2. Text  3. Markdown  4. CSV")?;
        let format = match self.ask("Format (1-4): ")?.as_str() {
            "1" => ExportFormat::Json,
            "2" => ExportFormat::Txt,
            "3" => ExportFormat::Md,
            "4" => ExportFormat::Csv,
            _ => return writeln!(self.out, "❌ Invalid choice"),
        };

        let rendered = match export::render(self.library.store(), format) {
            Ok(text) => text,
            Err(e) => return self.error(&e),
        };
        let today = chrono::Local::now().date_naive();
        let path = self.export_dir.join(export::default_file_name(format, today));
        match fs::write(&path, rendered) {
            Ok(()) => writeln!(self.out, "✅ Exported to {}", path.display()),
            Err(e) => writeln!(self.out, "❌ Export failed: {}", e),
        }
    }

    fn import(&mut self) -> io::Result<()> {
        let raw = self.ask("Snapshot file to import: ")?;
        if raw.is_empty() {
            return self.error(&VocabError::EmptyField("path"));
        }

        let snapshot = match fs::read_to_string(&raw) {
            Ok(text) => match Snapshot::from_import_json(&text) {
                Ok(snapshot) => snapshot,
                Err(e) => return self.error(&e),
            },
            Err(e) => return writeln!(self.out, "❌ Cannot read {}: {}", raw, e),
        };

        let prompt = format!(
            "Replace all {} entries with {} imported ones?",
            self.library.len(),
            snapshot.vocab_data.len()
        );
        if !self.confirm(&prompt)? {
            return writeln!(self.out, "❌ Cancelled");
        }
        let outcome = self.library.replace_with(snapshot);
        writeln!(self.out, "✅ Imported {} entries", outcome.value)?;
        self.report_save(&outcome)
    }

    fn clear(&mut self) -> io::Result<()> {
        if !self.confirm("Delete ALL entries and custom categories?")? {
            return writeln!(self.out, "❌ Cancelled");
        }
        let outcome = self.library.clear();
        writeln!(self.out, "✅ Removed {} entries", outcome.value)?;
        self.report_save(&outcome)
    }
}

/// Print one entry in the detailed block layout
pub fn display_entry<W: Write>(out: &mut W, entry: &Entry, number: usize) -> io::Result<()> {
    let rule = "=".repeat(40);
    writeln!(out, "\n{}. {}", number, rule)?;
    writeln!(out, "📝 Term: {}", entry.content)?;
    writeln!(out, "🏷️  Category: {}", entry.category)?;
    writeln!(out, "📖 Explanation: {}", entry.explanation)?;
    if !entry.example.is_empty() {
        writeln!(out, "💻 Example:\n{}", entry.example)?;
    }
    if !entry.pronunciation.is_empty() {
        writeln!(out, "🔊 Pronunciation: {}", entry.pronunciation)?;
    }
    writeln!(out, "{}", rule)
}

// ============================================================================
// TESTS
// ============================================================================
