use crate::error::{Result, TerminusError};
use crate::validate::{day_name, format_time};
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Note,
    Question,
    Link,
}

impl ContentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Note => "note",
            ContentKind::Question => "question",
            ContentKind::Link => "link",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single unit of module content seen as `{name, data}`.
pub trait Content {
    fn name(&self) -> &str;

    /// Full user-facing rendering of the entity.
    fn data(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    name: String,
    data: String,
}

impl Note {
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn body(&self) -> &str {
        &self.data
    }

    pub fn set_data(&mut self, data: impl Into<String>) {
        self.data = data.into();
    }
}

impl Content for Note {
    fn name(&self) -> &str {
        &self.name
    }

    fn data(&self) -> String {
        self.data.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub answer: String,
}

impl Question {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

impl Content for Question {
    fn name(&self) -> &str {
        &self.question
    }

    fn data(&self) -> String {
        format!("[Question] {}\n[Answer] {}", self.question, self.answer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub description: String,
    pub day: Weekday,
    pub start_time: NaiveTime,
    pub url: String,
}

impl Link {
    pub fn new(
        description: impl Into<String>,
        day: Weekday,
        start_time: NaiveTime,
        url: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            day,
            start_time,
            url: url.into(),
        }
    }
}

impl Content for Link {
    fn name(&self) -> &str {
        &self.description
    }

    fn data(&self) -> String {
        format!(
            "[Description] {}\n[Day] {}\n[Start time] {}\n[Link] {}",
            self.description,
            day_name(self.day),
            format_time(&self.start_time),
            self.url
        )
    }
}

/// Ordered collection of one content kind. User-facing indexes are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentManager<T> {
    contents: Vec<T>,
}

impl<T> Default for ContentManager<T> {
    fn default() -> Self {
        Self {
            contents: Vec::new(),
        }
    }
}

impl<T: Content> ContentManager<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, content: T) {
        self.contents.push(content);
    }

    pub fn content_data(&self, index: usize) -> Result<String> {
        let i = self.position(index)?;
        Ok(self.contents[i].data())
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        let i = self.position(index)?;
        Ok(&self.contents[i])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let i = self.position(index)?;
        Ok(&mut self.contents[i])
    }

    /// Removes the entity at `index`; later entries shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<T> {
        let i = self.position(index)?;
        Ok(self.contents.remove(i))
    }

    pub fn purge_data(&mut self) {
        self.contents.clear();
    }

    pub fn contents(&self) -> &[T] {
        &self.contents
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.contents.iter().any(|c| c.name() == name)
    }

    /// `(index, name)` pairs in display order.
    pub fn list_all(&self) -> Vec<(usize, String)> {
        self.contents
            .iter()
            .enumerate()
            .map(|(i, c)| (i + 1, c.name().to_string()))
            .collect()
    }

    fn position(&self, index: usize) -> Result<usize> {
        if index < 1 || index > self.contents.len() {
            return Err(TerminusError::IndexOutOfRange {
                index,
                len: self.contents.len(),
            });
        }
        Ok(index - 1)
    }
}

/// Content kinds that a [`Module`] stores, with typed access to their manager.
pub trait ContentType: Content + Sized {
    const KIND: ContentKind;

    fn manager(module: &Module) -> &ContentManager<Self>;
    fn manager_mut(module: &mut Module) -> &mut ContentManager<Self>;
}

impl ContentType for Note {
    const KIND: ContentKind = ContentKind::Note;

    fn manager(module: &Module) -> &ContentManager<Self> {
        &module.notes
    }

    fn manager_mut(module: &mut Module) -> &mut ContentManager<Self> {
        &mut module.notes
    }
}

impl ContentType for Question {
    const KIND: ContentKind = ContentKind::Question;

    fn manager(module: &Module) -> &ContentManager<Self> {
        &module.questions
    }

    fn manager_mut(module: &mut Module) -> &mut ContentManager<Self> {
        &mut module.questions
    }
}

impl ContentType for Link {
    const KIND: ContentKind = ContentKind::Link;

    fn manager(module: &Module) -> &ContentManager<Self> {
        &module.links
    }

    fn manager_mut(module: &mut Module) -> &mut ContentManager<Self> {
        &mut module.links
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    // Note bodies live in per-module text files, not in the JSON document
    #[serde(skip)]
    notes: ContentManager<Note>,
    #[serde(default)]
    questions: ContentManager<Question>,
    #[serde(default)]
    links: ContentManager<Link>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn manager<T: ContentType>(&self) -> &ContentManager<T> {
        T::manager(self)
    }

    pub fn manager_mut<T: ContentType>(&mut self) -> &mut ContentManager<T> {
        T::manager_mut(self)
    }

    pub fn count(&self, kind: ContentKind) -> usize {
        match kind {
            ContentKind::Note => self.notes.len(),
            ContentKind::Question => self.questions.len(),
            ContentKind::Link => self.links.len(),
        }
    }
}

/// All modules by name. Iteration order is the name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRegistry {
    #[serde(default)]
    modules: BTreeMap<String, Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module_names(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn module(&self, name: &str) -> Result<&Module> {
        self.modules
            .get(name)
            .ok_or_else(|| TerminusError::ModuleNotFound(name.to_string()))
    }

    pub fn module_mut(&mut self, name: &str) -> Result<&mut Module> {
        self.modules
            .get_mut(name)
            .ok_or_else(|| TerminusError::ModuleNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Returns false if a module with that name already exists.
    pub fn add_module(&mut self, name: &str) -> bool {
        if self.modules.contains_key(name) {
            return false;
        }
        self.modules.insert(name.to_string(), Module::new(name));
        true
    }

    pub fn remove_module(&mut self, name: &str) -> Option<Module> {
        self.modules.remove(name)
    }

    pub fn rename_module(&mut self, from: &str, to: &str) -> Result<()> {
        if self.modules.contains_key(to) {
            return Err(TerminusError::InvalidArgument(format!(
                "Module {} already exists",
                to
            )));
        }
        let mut module = self
            .modules
            .remove(from)
            .ok_or_else(|| TerminusError::ModuleNotFound(from.to_string()))?;
        module.name = to.to_string();
        self.modules.insert(to.to_string(), module);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Map keys are authoritative; realign names after a hand-edited document.
    pub(crate) fn normalize_names(&mut self) {
        for (name, module) in self.modules.iter_mut() {
            if &module.name != name {
                module.name = name.clone();
            }
        }
    }
}
