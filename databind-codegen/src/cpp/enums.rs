//! Enum code generation.

use crate::config::GeneratorConfig;
use databind_schema::types::{SchemaEnum, escape_cpp_string};

/// Generator for enum namespace blocks.
pub struct EnumEmitter<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> EnumEmitter<'a> {
    /// Creates a new enum emitter.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generates the declaration block of an enum.
    #[must_use]
    pub fn declaration(&self, enum_def: &SchemaEnum) -> String {
        let mut output = String::new();
        let name = &enum_def.generated_name;

        output.push_str(&format!("namespace {}\n{{\n", name));
        output.push_str("    enum Type\n    {\n");
        for value in &enum_def.values {
            output.push_str(&format!("        {},\n", value.name));
        }
        output.push_str("    };\n\n");

        output.push_str(&format!(
            "    const {}* GetDataEnumInfos();\n",
            self.config.runtime("DataEnumInfos")
        ));
        output.push_str(&format!(
            "    void GetEnumValues(std::vector<{}::Type>& enumValues);\n",
            name
        ));
        output.push_str("    size_t GetSize();\n\n");
        output.push_str("    void Register();\n");
        output.push_str("}\n");

        output
    }

    /// Generates the implementation block of an enum.
    ///
    /// Enum metadata is registered under the schema name, which is also the
    /// name the read/write routines look it up by.
    #[must_use]
    pub fn implementation(&self, enum_def: &SchemaEnum) -> String {
        let mut output = String::new();
        let name = &enum_def.generated_name;
        let infos = self.config.runtime("DataEnumInfos");
        let resources = format!("{}()", self.config.runtime("GetResources"));
        let key = escape_cpp_string(&enum_def.name);
        let count = enum_def.len();

        output.push_str(&format!("namespace {}\n{{\n", name));

        output.push_str("    void Register()\n    {\n");
        output.push_str(&format!(
            "        {infos}* enumInfos = new {infos};\n"
        ));
        output.push_str(&format!("        enumInfos->values.reserve({});\n", count));
        for value in &enum_def.values {
            output.push_str(&format!(
                "        enumInfos->values.push_back(\"{}\");\n",
                escape_cpp_string(&value.name)
            ));
        }
        output.push_str(&format!(
            "        {}->RegisterDataEnumInfos(\"{}\", enumInfos);\n",
            resources, key
        ));
        output.push_str("    }\n\n");

        output.push_str(&format!("    const {}* GetDataEnumInfos()\n    {{\n", infos));
        output.push_str(&format!(
            "        return {}->GetDataEnumInfos(\"{}\");\n",
            resources, key
        ));
        output.push_str("    }\n\n");

        output.push_str(&format!(
            "    void GetEnumValues(std::vector<{}::Type>& enumValues)\n    {{\n",
            name
        ));
        output.push_str(&format!("        enumValues.reserve({});\n", count));
        for value in &enum_def.values {
            output.push_str(&format!(
                "        enumValues.push_back({}::{});\n",
                name, value.name
            ));
        }
        output.push_str("    }\n\n");

        output.push_str("    size_t GetSize()\n    {\n");
        output.push_str(&format!("        return {};\n", count));
        output.push_str("    }\n");

        output.push_str("}\n");

        output
    }
}
