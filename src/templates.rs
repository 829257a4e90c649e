//! Test templates dropped for the `TestCase` class of the executor.

use serde::Deserialize;

/// Source of the three literal test templates. Strings are used verbatim.
pub trait TemplateProvider {
    fn test_definition(&self) -> String;
    fn test_execution(&self) -> String;
    fn test_unit_definition(&self) -> String;
}

const TEST_DEFINITION: &str = "\
class TESTCASE_01(TestCase):
\tdef description(self):
\t\tself.setPurpose(purpose=description('summary'))
\t\tself.setRequirement(requirement=description('requirement'))
\tdef prepare(self):
\t\tpass
\tdef definition(self):
\t\tpass
\tdef cleanup(self, aborted):
\t\tpass
";

const TEST_EXECUTION: &str = "TESTCASE_01(suffix=None).execute()\n";

const TEST_UNIT_DEFINITION: &str = "\
class TESTCASE_01(TestCase):
\tdef description(self):
\t\tself.setPurpose(purpose=description('summary'))
\tdef prepare(self):
\t\tpass
\tdef definition(self):
\t\tpass
\tdef cleanup(self, aborted):
\t\tpass
";

/// Templates read from the `[templates]` configuration table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultTemplates {
    pub definition: String,
    pub execution: String,
    pub unit_definition: String,
}

impl Default for DefaultTemplates {
    fn default() -> Self {
        DefaultTemplates {
            definition: TEST_DEFINITION.to_string(),
            execution: TEST_EXECUTION.to_string(),
            unit_definition: TEST_UNIT_DEFINITION.to_string(),
        }
    }
}

impl TemplateProvider for DefaultTemplates {
    fn test_definition(&self) -> String {
        self.definition.clone()
    }

    fn test_execution(&self) -> String {
        self.execution.clone()
    }

    fn test_unit_definition(&self) -> String {
        self.unit_definition.clone()
    }
}
