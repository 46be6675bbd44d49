extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod tables;
pub use tables::{
    emit::Emitter,
    first_follow::transcribe_first_follow,
    ll1_table::transcribe_parse_table,
    pretty_print::{render_first_follow, render_parse_table, OutputFormat},
    Config, FirstFollowTable, ParseTable,
};

fn error_to_json(e: tables::TranscribeError) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

/// Run on the rendered First/Follow page: returns the two `HashMap::from` literals.
#[wasm_bindgen]
pub fn first_follow_to_rust(html: &str) -> Result<String, JsValue> {
    let config = Config::default();
    transcribe_first_follow(html, &config)
        .map(|t| Emitter::new(&config.emit).first_follow(&t))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn ll1_table_to_rust(html: &str) -> Result<String, JsValue> {
    let config = Config::default();
    transcribe_parse_table(html, &config)
        .map(|t| Emitter::new(&config.emit).parse_table(&t))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn first_follow_to_json(html: &str) -> String {
    match transcribe_first_follow(html, &Config::default()).and_then(|t| t.to_json()) {
        Ok(json) => json,
        Err(e) => error_to_json(e),
    }
}

#[wasm_bindgen]
pub fn ll1_table_to_json(html: &str) -> String {
    match transcribe_parse_table(html, &Config::default()).and_then(|t| t.to_json()) {
        Ok(json) => json,
        Err(e) => error_to_json(e),
    }
}



#[cfg(test)]
mod document_tests {
    use crate::tables::{
        document::{decode_entities, Document, Node},
        ErrorKind,
    };

    #[test]
    fn simple_tree() {
        let d = Document::parse("<div class=\"a b\" id=x><p>hi</p></div>").unwrap();
        let div = d.root.find(|e| e.tag == "div").unwrap();
        assert!(div.has_class("a"));
        assert!(div.has_class("b"));
        assert!(!div.has_class("c"));
        assert_eq!(div.attribute("id"), Some("x"));
        assert_eq!(div.child_elements().count(), 1);
        assert_eq!(div.text(), "hi");
    }

    #[test]
    fn tags_are_case_insensitive() {
        let d = Document::parse("<TABLE CLASS='stats'><TR><TD>x</td></tr></Table>").unwrap();
        let table = d.root.find(|e| e.tag == "table").unwrap();
        assert!(table.has_class("stats"));
        assert_eq!(table.find(|e| e.tag == "td").unwrap().text(), "x");
    }

    #[test]
    fn descendants_in_document_order() {
        let d = Document::parse("<a><b><c></c></b><d></d></a><e/>").unwrap();
        let tags: Vec<&str> = d.root.descendants().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn text_is_collapsed() {
        let d = Document::parse("<p>  a \n <b>b</b>  c&nbsp;</p>").unwrap();
        assert_eq!(d.root.find(|e| e.tag == "p").unwrap().text(), "a b c");
    }

    #[test]
    fn entities() {
        assert_eq!(
            decode_entities("a &amp; b &lt;c&gt; &#65;&#x42; &unknown; &"),
            "a & b <c> AB &unknown; &"
        );
        assert_eq!(decode_entities("&epsilon; &rarr;"), "ε →");
    }

    #[test]
    fn implied_cell_and_row_ends() {
        let d = Document::parse("<table><tr><td>1<td>2<tr><td>3</table><p>after</p>").unwrap();
        let table = d.root.find(|e| e.tag == "table").unwrap();
        let rows: Vec<_> = table.child_elements().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].child_elements().count(), 2);
        assert_eq!(rows[1].child_elements().count(), 1);
        assert_eq!(rows[1].text(), "3");
        assert!(table.find(|e| e.tag == "p").is_none());
    }

    #[test]
    fn void_and_self_closing_elements() {
        let d = Document::parse("<td>a<br>b<img src=x.png/>c</td>").unwrap();
        let td = d.root.find(|e| e.tag == "td").unwrap();
        assert_eq!(td.child_elements().count(), 2);
        assert_eq!(td.text(), "abc");
    }

    #[test]
    fn comments_doctype_and_scripts_are_skipped() {
        let d = Document::parse(
            "<!DOCTYPE html><!-- <table> --><script>if (a < b) {}</script><p>x</p>",
        )
        .unwrap();
        assert!(d.root.find(|e| e.tag == "table").is_none());
        let script = d.root.find(|e| e.tag == "script").unwrap();
        assert_eq!(script.children, vec![Node::Text("if (a < b) {}".to_string())]);
        assert_eq!(d.root.find(|e| e.tag == "p").unwrap().text(), "x");
    }

    #[test]
    fn stray_end_tags_and_lone_brackets() {
        let d = Document::parse("<p>a < b</span> c</p>").unwrap();
        assert_eq!(d.root.find(|e| e.tag == "p").unwrap().text(), "a < b c");
    }

    #[test]
    fn unterminated_tag() {
        let e = Document::parse("<table>\n<tr\n").unwrap_err();
        assert_eq!(
            e.kind(),
            &ErrorKind::Document {
                line: 2,
                message: "unterminated tag <tr>".to_string()
            }
        );
    }

    #[test]
    fn unterminated_comment() {
        let e = Document::parse("<p>x</p><!-- oops").unwrap_err();
        assert!(matches!(e.kind(), ErrorKind::Document { line: 1, .. }));
    }
}


#[cfg(test)]
mod ll1_tests {
    use super::fixtures::{expr_ll1_page, ll1_page};
    use crate::tables::{
        config::SymbolTags,
        ll1_table::{build_parse_table, transcribe_parse_table, ParseKey},
        reader::{Markup, ProductionRow},
        Config, ErrorKind, SymbolRef, Terminal,
    };

    fn key(nt: &str, t: Terminal) -> ParseKey {
        ParseKey {
            nonterminal: nt.to_string(),
            terminal: t,
        }
    }

    #[test]
    fn expr_rows() {
        let table = transcribe_parse_table(&expr_ll1_page(), &Config::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(&key("Expr", Terminal::Id)),
            Some(&vec![
                SymbolRef::Terminal(Terminal::Id),
                SymbolRef::NonTerminal("Term".to_string()),
            ])
        );
        assert_eq!(
            table.get(&key("Expr", Terminal::EndOfFile)),
            Some(&vec![
                SymbolRef::Terminal(Terminal::EndOfFile),
                SymbolRef::NonTerminal("Term".to_string()),
            ])
        );
        assert!(!table.contains_key(&key("Expr", Terminal::Plus)));
    }

    #[test]
    fn body_drops_only_the_marker() {
        let page = ll1_page(
            &["id", "semi"],
            &[
                (
                    "A",
                    vec![
                        Some("<nonterm>A</nonterm> &rarr; <term>id</term> <nonterm>B</nonterm> <term>semi</term>"),
                        Some("<nonterm>A</nonterm> &rarr; &epsilon;"),
                    ],
                ),
                ("B", vec![None, None]),
            ],
        );
        let table = transcribe_parse_table(&page, &Config::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&key("A", Terminal::Id)).unwrap().len(), 3);
        assert_eq!(table.get(&key("A", Terminal::Semi)), Some(&vec![]));
        assert!(!table.contains_key(&key("B", Terminal::Id)));
        assert!(!table.contains_key(&key("B", Terminal::Semi)));
    }

    #[test]
    fn entries_follow_row_then_column_order() {
        let page = ll1_page(
            &["semi", "id"],
            &[
                ("B", vec![Some("<nonterm>B</nonterm> <term>semi</term>"), Some("<nonterm>B</nonterm>")]),
                ("A", vec![None, Some("<nonterm>A</nonterm> <term>id</term>")]),
            ],
        );
        let table = transcribe_parse_table(&page, &Config::default()).unwrap();
        let keys: Vec<ParseKey> = table.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                key("B", Terminal::Semi),
                key("B", Terminal::Id),
                key("A", Terminal::Id)
            ]
        );
    }

    #[test]
    fn actions() {
        let page = ll1_page(
            &["id"],
            &[(
                "A",
                vec![Some(
                    "<nonterm>A</nonterm> <action>create_marker()</action> <term>id</term> <action>create_leaf()</action>",
                )],
            )],
        );
        let table = transcribe_parse_table(&page, &Config::default()).unwrap();
        assert_eq!(
            table.get(&key("A", Terminal::Id)),
            Some(&vec![
                SymbolRef::Action {
                    kind: "action".to_string(),
                    name: "create_marker()".to_string()
                },
                SymbolRef::Terminal(Terminal::Id),
                SymbolRef::Action {
                    kind: "action".to_string(),
                    name: "create_leaf()".to_string()
                },
            ])
        );
    }

    #[test]
    fn custom_action_tag() {
        let mut config = Config::default();
        config.symbol_tags.action.push("sem".to_string());
        let page = ll1_page(
            &["id"],
            &[("A", vec![Some("<nonterm>A</nonterm> <sem>mark</sem>")])],
        );
        let table = transcribe_parse_table(&page, &config).unwrap();
        assert_eq!(
            table.get(&key("A", Terminal::Id)),
            Some(&vec![SymbolRef::Action {
                kind: "sem".to_string(),
                name: "mark".to_string()
            }])
        );
    }

    #[test]
    fn unknown_symbol_in_header() {
        let page = ll1_page(&["id", "frobnicate"], &[("A", vec![None, None])]);
        let e = transcribe_parse_table(&page, &Config::default()).unwrap_err();
        assert_eq!(e.kind(), &ErrorKind::UnknownSymbol("frobnicate".to_string()));
        assert_eq!(e.context().column, Some(2));
    }

    #[test]
    fn unknown_symbol_in_cell() {
        let page = ll1_page(
            &["id"],
            &[("A", vec![Some("<nonterm>A</nonterm> <term>frobnicate</term>")])],
        );
        let e = transcribe_parse_table(&page, &Config::default()).unwrap_err();
        assert_eq!(e.kind(), &ErrorKind::UnknownSymbol("frobnicate".to_string()));
        assert_eq!(e.context().row, Some(1));
        assert_eq!(e.context().column, Some(1));
        assert_eq!(e.context().nonterminal.as_deref(), Some("A"));
    }

    #[test]
    fn unknown_marker_is_not_resolved() {
        // the marker is dropped before resolution, whatever its text
        let page = ll1_page(
            &["id"],
            &[("A", vec![Some("<term>frobnicate</term> <term>id</term>")])],
        );
        let table = transcribe_parse_table(&page, &Config::default()).unwrap();
        assert_eq!(
            table.get(&key("A", Terminal::Id)),
            Some(&vec![SymbolRef::Terminal(Terminal::Id)])
        );
    }

    #[test]
    fn cell_count_mismatch() {
        let page = ll1_page(&["id", "plus", "$"], &[("A", vec![None, None])]);
        let e = transcribe_parse_table(&page, &Config::default()).unwrap_err();
        assert_eq!(
            e.kind(),
            &ErrorKind::MalformedRow {
                expected: 3,
                found: 2
            }
        );
        assert_eq!(e.context().nonterminal.as_deref(), Some("A"));
    }

    #[test]
    fn build_rejects_short_row() {
        let terminals: Vec<String> = ["id", "plus", "$"].iter().map(|t| t.to_string()).collect();
        let rows = vec![Ok(ProductionRow {
            nonterminal: "A".to_string(),
            cells: vec![Some(vec![
                Markup {
                    tag: "nonterm".to_string(),
                    text: "A".to_string(),
                },
                Markup {
                    tag: "term".to_string(),
                    text: "id".to_string(),
                },
            ])],
        })];
        let e = build_parse_table(&terminals, rows, &SymbolTags::default()).unwrap_err();
        assert_eq!(
            e.kind(),
            &ErrorKind::MalformedRow {
                expected: 3,
                found: 1
            }
        );
        assert_eq!(e.context().row, Some(1));
        assert_eq!(e.context().nonterminal.as_deref(), Some("A"));
    }

    #[test]
    fn header_reads_only_terminals() {
        let page = ll1_page(
            &["id", "semi"],
            &[(
                "A",
                vec![None, Some("<nonterm>A</nonterm> <term>semi</term>")],
            )],
        )
        .replace("<th></th>", "<th><nonterm>Corner</nonterm></th>");
        let table = transcribe_parse_table(&page, &Config::default()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get(&key("A", Terminal::Semi)),
            Some(&vec![SymbolRef::Terminal(Terminal::Semi)])
        );
    }

    #[test]
    fn missing_row_header() {
        let page = "<table class=\"parse_table\">\
                    <tr><th></th><th><terminal>id</terminal></th></tr>\
                    <tr><td><nonterm>A</nonterm></td></tr></table>";
        let e = transcribe_parse_table(page, &Config::default()).unwrap_err();
        assert_eq!(e.kind(), &ErrorKind::MissingHeader("production row header cell"));
        assert_eq!(e.context().row, Some(1));
    }

    #[test]
    fn missing_terminal_header() {
        let page = "<table class=\"parse_table\"><tr><th>nothing</th></tr></table>";
        let e = transcribe_parse_table(page, &Config::default()).unwrap_err();
        assert_eq!(e.kind(), &ErrorKind::MissingHeader("terminal header row"));
    }

    #[test]
    fn duplicate_key_last_write_wins_in_place() {
        let page = ll1_page(
            &["lpar", "openpar"],
            &[(
                "A",
                vec![
                    Some("<nonterm>A</nonterm> <nonterm>First</nonterm>"),
                    Some("<nonterm>A</nonterm> <nonterm>Second</nonterm>"),
                ],
            )],
        );
        let table = transcribe_parse_table(&page, &Config::default()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get(&key("A", Terminal::OpenPar)),
            Some(&vec![SymbolRef::NonTerminal("Second".to_string())])
        );
    }

    #[test]
    fn nested_tables_are_not_rows() {
        let page = ll1_page(
            &["id"],
            &[("A", vec![Some("<nonterm>A</nonterm> <term>id</term>")])],
        )
        .replace(
            "<th></th>",
            "<th><table><tr><td>legend</td></tr></table></th>",
        );
        let table = transcribe_parse_table(&page, &Config::default()).unwrap();
        assert_eq!(table.len(), 1);
    }
}
