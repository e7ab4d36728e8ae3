//! Generator configuration.

/// Default output file stem and routine prefix.
pub const DEFAULT_BASE_NAME: &str = "DataBinding";

/// Default namespace of the host runtime.
pub const DEFAULT_RUNTIME_NAMESPACE: &str = "gugu";

const DEFAULT_HEADER_INCLUDES: [&str; 3] = [
    "Gugu/Data/DataBindingUtility.h",
    "Gugu/Data/DatasheetObject.h",
    "Gugu/Data/DatasaveObject.h",
];

const DEFAULT_SOURCE_INCLUDES: [&str; 2] = [
    "Gugu/Resources/ManagerResources.h",
    "Gugu/System/SystemUtility.h",
];

/// Settings shared by both emitters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    base_name: String,
    runtime_namespace: String,
    header_includes: Vec<String>,
    source_includes: Vec<String>,
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_name: DEFAULT_BASE_NAME.to_string(),
            runtime_namespace: DEFAULT_RUNTIME_NAMESPACE.to_string(),
            header_includes: DEFAULT_HEADER_INCLUDES.map(String::from).to_vec(),
            source_includes: DEFAULT_SOURCE_INCLUDES.map(String::from).to_vec(),
        }
    }

    /// Sets the output file stem. An empty name keeps the default.
    #[must_use]
    pub fn base_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.base_name = if name.trim().is_empty() {
            DEFAULT_BASE_NAME.to_string()
        } else {
            name.trim().to_string()
        };
        self
    }

    /// Sets the namespace of the host runtime. An empty namespace emits
    /// unqualified runtime names.
    #[must_use]
    pub fn runtime_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.runtime_namespace = namespace.into();
        self
    }

    /// Replaces the includes of the declaration unit.
    #[must_use]
    pub fn header_includes<I, S>(mut self, includes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header_includes = includes.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the includes of the implementation unit.
    #[must_use]
    pub fn source_includes<I, S>(mut self, includes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_includes = includes.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the output file stem.
    #[must_use]
    pub fn get_base_name(&self) -> &str {
        &self.base_name
    }

    /// Returns the includes of the declaration unit.
    #[must_use]
    pub fn get_header_includes(&self) -> &[String] {
        &self.header_includes
    }

    /// Returns the includes of the implementation unit.
    #[must_use]
    pub fn get_source_includes(&self) -> &[String] {
        &self.source_includes
    }

    /// Declaration unit file name.
    #[must_use]
    pub fn header_file_name(&self) -> String {
        format!("{}.h", self.base_name)
    }

    /// Implementation unit file name.
    #[must_use]
    pub fn source_file_name(&self) -> String {
        format!("{}.cpp", self.base_name)
    }

    /// Name of the free registration routine.
    #[must_use]
    pub fn register_routine(&self) -> String {
        format!("{}_Register", self.base_name)
    }

    /// Name of the free factory routine.
    #[must_use]
    pub fn factory_routine(&self) -> String {
        format!("{}_InstanciateDataObject", self.base_name)
    }

    /// Qualifies a runtime item, e.g. `gugu::DataObject`.
    #[must_use]
    pub fn runtime(&self, item: &str) -> String {
        if self.runtime_namespace.is_empty() {
            item.to_string()
        } else {
            format!("{}::{}", self.runtime_namespace, item)
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
