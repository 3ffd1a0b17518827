//! Templates: named, persisted documents with an optional data source.
//!
//! A template couples a document with per-element data mappings so a
//! tabular dataset can mass-produce bound copies. Templates persist as
//! JSON files in a store directory; the on-disk shape keeps the field
//! names the property editors and older saves use (`dataSource`,
//! camelCase element properties).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cardkit_core::{DataError, Result, Unit};

use crate::document::Document;
use crate::element::Element;

/// Comparison operator of a conditional mapping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MappingOperator {
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "not equals")]
    NotEquals,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "greater than")]
    GreaterThan,
    #[serde(rename = "less than")]
    LessThan,
}

/// One rule of a conditional mapping: when `row[column] <op> value`
/// holds, `result` is written into the element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub column: String,
    pub operator: MappingOperator,
    pub value: String,
    pub result: String,
}

/// How a dataset column maps onto an element's content field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Mapping {
    /// Copy the cell value directly.
    Direct { column: String },
    /// First matching condition's result wins; no match leaves the
    /// element untouched.
    Conditional { conditions: Vec<Condition> },
    /// String template with `${column}` placeholders substituted per row.
    Macro { expression: String },
}

/// A template's declared tabular data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    /// Source kind; only "csv" exists today.
    #[serde(rename = "type")]
    pub kind: String,
    /// CSV filename, resolved against the data directory.
    pub file: String,
    /// Element id -> mapping.
    #[serde(default)]
    pub mappings: BTreeMap<String, Mapping>,
}

impl DataSource {
    pub fn csv(file: impl Into<String>) -> Self {
        Self {
            kind: "csv".to_string(),
            file: file.into(),
            mappings: BTreeMap::new(),
        }
    }
}

/// Canvas dimensions as persisted in template files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub unit: Unit,
    pub dpi: u32,
}

/// Template metadata block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    pub name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// On-disk template file shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TemplateFile {
    /// Component type ("card", "token", "board").
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    dimensions: Dimensions,
    #[serde(default = "default_background")]
    background_color: String,
    elements: Vec<Element>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    #[serde(rename = "dataSource", default, skip_serializing_if = "Option::is_none")]
    data_source: Option<DataSource>,
    metadata: TemplateMetadata,
}

fn default_kind() -> String {
    "card".to_string()
}

fn default_background() -> String {
    "#FFFFFF".to_string()
}

/// A named document plus its data-source configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    pub description: String,
    pub category: String,
    /// Component type ("card", "token", "board").
    pub kind: String,
    pub document: Document,
    pub data_source: Option<DataSource>,
    pub created_at: String,
    pub updated_at: String,
}

impl Template {
    pub fn new(name: impl Into<String>, document: Document) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: String::new(),
            kind: default_kind(),
            document,
            data_source: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    /// Assign generated ids to elements that lack one, so every element
    /// can be a mapping target. Existing ids are kept.
    pub fn ensure_element_ids(&mut self) {
        for element in &mut self.document.elements {
            if element.id.is_none() {
                element.id = Some(Uuid::new_v4().simple().to_string());
            }
        }
    }

    /// Load a template from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DataError::TemplateLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let file: TemplateFile =
            serde_json::from_str(&content).map_err(|e| DataError::TemplateLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_file(file))
    }

    /// Save the template as pretty-printed JSON, stamping timestamps.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        if self.created_at.is_empty() {
            self.created_at = now.clone();
        }
        self.updated_at = now;

        let file = self.to_file();
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| cardkit_core::Error::other(e.to_string()))?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    fn from_file(file: TemplateFile) -> Self {
        let mut document = Document::new(
            file.dimensions.width,
            file.dimensions.height,
            file.dimensions.unit,
            file.dimensions.dpi,
        );
        document.background_color = file.background_color;
        document.elements = file.elements;
        Self {
            name: file.metadata.name,
            description: file.description,
            category: file.category,
            kind: file.kind,
            document,
            data_source: file.data_source,
            created_at: file.metadata.created_at,
            updated_at: file.metadata.updated_at,
        }
    }

    fn to_file(&self) -> TemplateFile {
        TemplateFile {
            kind: self.kind.clone(),
            dimensions: Dimensions {
                width: self.document.width,
                height: self.document.height,
                unit: self.document.unit,
                dpi: self.document.dpi,
            },
            background_color: self.document.background_color.clone(),
            elements: self.document.elements.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            data_source: self.data_source.clone(),
            metadata: TemplateMetadata {
                name: self.name.clone(),
                created_at: self.created_at.clone(),
                updated_at: self.updated_at.clone(),
            },
        }
    }
}

/// Summary record for template listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSummary {
    /// Store id (the file stem).
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Directory-backed template persistence.
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slugify(name)))
    }

    /// Persist a template under its name.
    pub fn save(&self, template: &mut Template) -> Result<()> {
        let path = self.path_for(&template.name);
        template.save(path)
    }

    /// Load a template by name.
    pub fn load(&self, name: &str) -> Result<Template> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(DataError::TemplateNotFound {
                name: name.to_string(),
            }
            .into());
        }
        Template::load(path)
    }

    /// Delete a template by name. Returns true if a file was removed.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name);
        if path.exists() {
            fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// List stored templates, optionally restricted to a category.
    /// Unreadable files are skipped with a warning.
    pub fn list(&self, category: Option<&str>) -> Result<Vec<TemplateSummary>> {
        let mut summaries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let template = match Template::load(&path) {
                Ok(t) => t,
                Err(err) => {
                    tracing::warn!("Skipping unreadable template {:?}: {}", path, err);
                    continue;
                }
            };
            if let Some(cat) = category {
                if template.category != cat {
                    continue;
                }
            }
            let id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            summaries.push(TemplateSummary {
                id,
                name: template.name,
                description: template.description,
                created_at: template.created_at,
                updated_at: template.updated_at,
            });
        }
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }
}

fn slugify(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    let collapsed: Vec<&str> = slug.split('-').filter(|s| !s.is_empty()).collect();
    if collapsed.is_empty() {
        "template".to_string()
    } else {
        collapsed.join("-")
    }
}
