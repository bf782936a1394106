use crate::error::StorageError;
use crate::state::data::{FileKind, FileRecord, MatchMode};
use crate::state::library::Library;

/// Split a raw filter string into query tokens.
///
/// Tokens are the whitespace-delimited units of the string; an empty or
/// all-whitespace filter yields no tokens, which downstream means
/// "no filter" rather than "match nothing".
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Run one filter evaluation against the catalog.
///
/// This is the per-keystroke entry point: tokenize the raw string and
/// hand the token set to the store. A storage failure surfaces as an
/// error so the caller can keep its previous result list on screen.
pub fn filter(
    library: &Library,
    kind: FileKind,
    raw: &str,
    mode: MatchMode,
) -> Result<Vec<FileRecord>, StorageError> {
    let tokens = tokenize(raw);
    library.query_by_tokens(kind, &tokens, mode.match_all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::CandidateFile;
    use tempfile::TempDir;

    #[test]
    fn tokenize_splits_on_any_whitespace() {
        assert_eq!(tokenize("sword 01"), vec!["sword", "01"]);
        assert_eq!(tokenize("  sword\t01\n"), vec!["sword", "01"]);
    }

    #[test]
    fn tokenize_of_empty_or_blank_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t  ").is_empty());
    }

    #[test]
    fn tokenize_preserves_input_order() {
        assert_eq!(tokenize("01 sword"), vec!["01", "sword"]);
    }

    #[test]
    fn filter_tokenizes_and_queries_in_one_call() {
        let dir = TempDir::new().unwrap();
        let mut library = Library::open(dir.path().join("catalog.db")).unwrap();

        let corpus: Vec<CandidateFile> = ["sword_01.png", "sword_02.png", "shield_01.png"]
            .iter()
            .map(|name| CandidateFile {
                name: name.to_string(),
                path: format!("/assets/{}", name),
                ext: ".png".to_string(),
                size: 512,
                kind: FileKind::Texture,
            })
            .collect();
        library.upsert_all(&corpus).unwrap();

        let all = filter(&library, FileKind::Texture, "sword 01", MatchMode::All).unwrap();
        let names: Vec<&str> = all.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["sword_01.png"]);

        let any = filter(&library, FileKind::Texture, "sword shield", MatchMode::Any).unwrap();
        assert_eq!(any.len(), 3);

        let unfiltered = filter(&library, FileKind::Texture, "", MatchMode::All).unwrap();
        assert_eq!(unfiltered.len(), 3);
    }
}
