//! Implementation of a symbol table interning the words of the gazetteer, so that n-gram counts
//! can be keyed by small integers instead of strings. A given string always maps to a single index.
use fnv::FnvHashMap;

#[derive(PartialEq, Eq, Debug, Default, Clone)]
pub struct TokenSymbolTable {
    string_to_index: FnvHashMap<String, u32>,
    available_index: u32,
}

impl TokenSymbolTable {
    /// Add a symbol to the symbol table, if it doesn't already exist, and return
    /// the corresponding index
    pub fn add_symbol(&mut self, symbol: &str) -> u32 {
        if let Some(index) = self.string_to_index.get(symbol) {
            return *index;
        }
        let symbol_index = self.available_index;
        self.available_index += 1;
        self.string_to_index.insert(symbol.to_string(), symbol_index);
        symbol_index
    }

    /// Find the index of a symbol in the symbol table.
    pub fn find_symbol(&self, symbol: &str) -> Option<u32> {
        self.string_to_index.get(symbol).cloned()
    }

    /// Number of symbols in the table, which is also the next available index
    pub fn len(&self) -> usize {
        self.available_index as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_in_token_symbol_table() {
        // Given
        let mut symtable = TokenSymbolTable::default();

        // When
        let symbol = "avadi";
        let index = symtable.add_symbol(symbol);

        // Then
        assert_eq!(Some(index), symtable.find_symbol(symbol));
        assert_eq!(None, symtable.find_symbol("road"));
    }

    #[test]
    fn test_add_existing_symbol_returns_same_index() {
        // Given
        let mut symtable = TokenSymbolTable::default();
        let index_avadi = symtable.add_symbol("avadi");
        let index_road = symtable.add_symbol("road");

        // When
        let index_avadi_again = symtable.add_symbol("avadi");

        // Then
        assert_eq!(index_avadi, index_avadi_again);
        assert_ne!(index_avadi, index_road);
        assert_eq!(2, symtable.len());
    }
}
