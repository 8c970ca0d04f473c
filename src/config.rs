// Analyzer configuration

use crate::semantic::{Symbol, SymbolKind};

/// Settings applied when a new analyzer instance is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Symbols bound in the root scope before the first token is read
    pub builtins: Vec<Symbol>,
}

impl Default for AnalyzerConfig {
    /// `System` and `println` are predeclared so that console output
    /// statements such as `System.out.println(x);` resolve. The lexer has no
    /// boolean literals, so `true` and `false` are bound as `boolean` names.
    fn default() -> Self {
        Self {
            builtins: vec![
                Symbol::new("System", "class", SymbolKind::Global),
                Symbol::new("println", "method", SymbolKind::Global),
                Symbol::new("true", "boolean", SymbolKind::Global),
                Symbol::new("false", "boolean", SymbolKind::Global),
            ],
        }
    }
}

impl AnalyzerConfig {
    /// A configuration with an empty root scope
    pub fn bare() -> Self {
        Self {
            builtins: Vec::new(),
        }
    }

    pub fn with_builtin(mut self, symbol: Symbol) -> Self {
        self.builtins.push(symbol);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;
    use crate::parser::parse::Parser;

    #[test]
    fn test_extra_builtin_resolves() {
        let config = AnalyzerConfig::bare().with_builtin(Symbol::new(
            "Math",
            "class",
            SymbolKind::Global,
        ));
        let tokens = Lexer::new("Math.abs(1);").tokenize();

        let analysis = Parser::with_config(tokens, &config).parse_program().unwrap();
        assert!(analysis.is_clean(), "{:?}", analysis.errors);
        assert_eq!(config.builtins.len(), 1);
    }

    #[test]
    fn test_boolean_names_are_predeclared() {
        let tokens = Lexer::new("boolean b = true; b = false; int n = true;").tokenize();

        let analysis = Parser::with_config(tokens, &AnalyzerConfig::default())
            .parse_program()
            .unwrap();
        assert_eq!(analysis.errors.len(), 1);
        assert!(analysis.messages()[0].contains("of type 'boolean' to 'n'"));
    }
}
