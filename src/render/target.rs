//! Target syntax strategy table
//!
//! Every language-dependent piece of rendered output (naming conventions,
//! folder layout, execution guide, heuristic comparison row, example
//! test, comment leader) is looked up here. Master and modular documents
//! and the skeleton generator all go through the same table.

/// Closed set of rendering strategies, derived from the IR language tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetSyntax {
    Python,
    Java,
    /// JavaScript and TypeScript
    JavaScript,
    /// Every other language
    Generic,
}

/// Language-specific text fragments.
///
/// Templates may contain `{file}` (suggested filename), `{language}`
/// (the IR language tag) and `{version}` (target version).
#[derive(Debug)]
pub struct Strategy {
    pub line_comment: &'static str,
    pub naming_conventions: &'static [&'static str],
    pub folder_template: &'static str,
    pub execution_guide: &'static str,
    pub heuristic: Option<Heuristic>,
    pub test_example: &'static str,
}

/// Extra comparison row emitted when `needle` occurs in legacy code
/// written in one of `languages`
#[derive(Debug)]
pub struct Heuristic {
    pub languages: &'static [&'static str],
    pub needle: &'static str,
    pub row: &'static str,
}

impl Heuristic {
    pub fn matches(&self, language: &str, original_code: &str) -> bool {
        let language = language.to_ascii_lowercase();
        self.languages.contains(&language.as_str()) && original_code.contains(self.needle)
    }
}

impl TargetSyntax {
    pub fn from_language(language: &str) -> Self {
        match language.to_ascii_lowercase().as_str() {
            "python" => Self::Python,
            "java" => Self::Java,
            "javascript" | "typescript" => Self::JavaScript,
            _ => Self::Generic,
        }
    }

    pub fn strategy(&self) -> &'static Strategy {
        match self {
            Self::Python => &PYTHON,
            Self::Java => &JAVA,
            Self::JavaScript => &JAVASCRIPT,
            Self::Generic => &GENERIC,
        }
    }
}

/// Target version for a language tag
pub fn target_version(language: &str) -> String {
    let version = match language.to_ascii_lowercase().as_str() {
        "python" => "Python 3.11+",
        "java" => "Java 17+ (LTS)",
        "javascript" => "ES2022+ / Node.js 18+",
        "typescript" => "TypeScript 5.0+",
        "cpp" => "C++20",
        "csharp" => "C# 11 / .NET 7+",
        _ => return format!("Modern {}", language),
    };
    version.to_string()
}

/// Fill the `{file}`, `{language}` and `{version}` slots of a template
///
/// The template is scanned once, so slot names inside the substituted
/// values are left as they are.
pub fn fill(template: &str, suggested_filename: &str, language: &str) -> String {
    let version = target_version(language);
    let mut out = String::with_capacity(template.len() + suggested_filename.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let slot = [
            ("{file}", suggested_filename),
            ("{language}", language),
            ("{version}", version.as_str()),
        ]
        .into_iter()
        .find(|(name, _)| rest.starts_with(name));

        match slot {
            Some((name, value)) => {
                out.push_str(value);
                rest = &rest[name.len()..];
            }
            None => {
                out.push('{');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

// ==================== Strategies ====================

static PYTHON: Strategy = Strategy {
    line_comment: "#",
    naming_conventions: &[
        "- **Files:** `snake_case.py`",
        "- **Classes:** `PascalCase`",
        "- **Functions:** `snake_case()`",
        "- **Constants:** `UPPER_SNAKE_CASE`",
    ],
    folder_template: "project/
├── src/
│   ├── __init__.py
│   ├── main.py
│   ├── services/
│   │   └── {file}
│   └── utils/
│       └── helpers.py
├── tests/
│   ├── test_services.py
│   └── test_utils.py
├── docs/
│   └── API.md
├── requirements.txt
└── README.md",
    execution_guide: r"### Prerequisites

```bash
# Install Python 3.11+
python --version

# Create virtual environment
python -m venv venv
source venv/bin/activate  # On Windows: venv\Scripts\activate

# Install dependencies
pip install -r requirements.txt
```

### Running the Code

```bash
python src/{file}
```",
    heuristic: Some(Heuristic {
        languages: &["python"],
        needle: "print(",
        row: "| Logging | `print()` statements | `logging` module | Proper log levels, file output, production-ready |",
    }),
    test_example: "# tests/test_services.py
import pytest


def test_behaviour_is_preserved():
    # Arrange legacy inputs, call the modern function, compare outputs
    ...",
};

static JAVA: Strategy = Strategy {
    line_comment: "//",
    naming_conventions: &[
        "- **Files:** `PascalCase.java`",
        "- **Classes:** `PascalCase`",
        "- **Methods:** `camelCase()`",
        "- **Constants:** `UPPER_SNAKE_CASE`",
    ],
    folder_template: "project/
├── src/
│   └── main/
│       └── java/
│           └── com/company/
│               ├── {file}
│               ├── services/
│               └── utils/
├── src/
│   └── test/
│       └── java/
├── pom.xml
└── README.md",
    execution_guide: "### Prerequisites

```bash
# Install Java 17+
java -version

# Build with Maven
mvn clean install

# Run
mvn exec:java
```",
    heuristic: Some(Heuristic {
        languages: &["java"],
        needle: "Vector",
        row: "| Collections | `Vector`, `Hashtable` | `ArrayList`, `HashMap` | Thread-safe by default causes overhead, modern generics |",
    }),
    test_example: "// src/test/java/com/company/ServiceTest.java
import org.junit.jupiter.api.Test;
import static org.junit.jupiter.api.Assertions.*;

class ServiceTest {
    @Test
    void behaviourIsPreserved() {
        // Arrange legacy inputs, call the modern method, compare outputs
    }
}",
};

static JAVASCRIPT: Strategy = Strategy {
    line_comment: "//",
    naming_conventions: &[
        "- **Files:** `kebab-case.js`",
        "- **Classes:** `PascalCase`",
        "- **Functions:** `camelCase()`",
        "- **Constants:** `UPPER_SNAKE_CASE`",
    ],
    folder_template: "project/
├── src/
│   ├── index.js
│   ├── services/
│   │   └── {file}
│   └── utils/
│       └── helpers.js
├── tests/
│   └── services.test.js
├── package.json
├── .eslintrc.js
└── README.md",
    execution_guide: "### Prerequisites

```bash
# Install Node.js 18+
node --version

# Install dependencies
npm install

# Run
npm start
```",
    heuristic: Some(Heuristic {
        languages: &["javascript"],
        needle: "var ",
        row: "| Variables | `var` keyword | `const`/`let` | Block scoping, prevents hoisting issues |",
    }),
    test_example: "// tests/services.test.js
describe('service', () => {
  test('behaviour is preserved', () => {
    // Arrange legacy inputs, call the modern function, compare outputs
  });
});",
};

static GENERIC: Strategy = Strategy {
    line_comment: "//",
    naming_conventions: &[],
    folder_template: "project/
├── src/
│   └── {file}
├── tests/
├── docs/
└── README.md",
    execution_guide: "### Prerequisites

Install a toolchain for {version} and the project's dependencies.

### Running the Code

```bash
# Build and run src/{file} with the standard {language} toolchain
```",
    heuristic: None,
    test_example: "# Add example test code based on language",
};
