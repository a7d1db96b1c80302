//! Export fixtures.

/// Wrap card elements in a Pleco XML export document.
pub fn xml_export(cards: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<plecoflash formatversion="2" creator="Pleco User" generator="Pleco 3.2">
<categories><category name="Imported"/></categories>
<cards>
{}
</cards>
</plecoflash>
"#,
        cards.join("\n")
    )
}

/// A card looked up in a Pleco dictionary.
pub fn dict_card(simplified: &str, traditional: &str, pron: &str, defn: &str) -> String {
    format!(
        r#"<card language="chinese" created="1700000000" modified="1700000000">
<entry><headword charset="sc">{simplified}</headword><headword charset="tc">{traditional}</headword>
<pron type="hypy" tones="numbers">{pron}</pron>
<defn>{defn}</defn></entry>
<dictref dictid="PACE" entryid="101"/>
<catassign category="Imported"/>
</card>"#
    )
}

/// A card whose content the user typed.
pub fn user_card(headword: &str, pron: &str, defn: &str) -> String {
    format!(
        r#"<card language="chinese" created="1700000000" modified="1700000000">
<entry><headword charset="sc">{headword}</headword>
<pron type="hypy" tones="numbers">{pron}</pron>
<defn>{defn}</defn></entry>
<catassign category="Imported"/>
</card>"#
    )
}

/// Tab-delimited export with one card per `(headword, pron, defn)` triple.
pub fn text_export(lines: &[(&str, &str, &str)]) -> String {
    lines
        .iter()
        .map(|(headword, pron, defn)| format!("{headword}\t{pron}\t{defn}\n"))
        .collect()
}
