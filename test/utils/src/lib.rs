pub fn assessment_fixture() -> &'static str {
    return r#"
{
    "verb": "hablar",
    "complexity": "regular",
    "overview": "Hablar is a regular -ar verb used for speaking and talking.",
    "special_notes": "Fully regular in every tense.",
    "recommended_practice": "core"
}
"#
    .trim();
}

pub fn conjugations_fixture() -> &'static str {
    return r#"
{
    "verb": "hablar",
    "overview": "To speak or to talk.",
    "notes": "Regular -ar endings throughout.",
    "related_verbs": ["conversar", "decir"],
    "conjugations": [
        {"pronoun": "yo", "tense": "present", "mood": "indicative", "form": "hablo"},
        {"pronoun": "tú", "tense": "present", "mood": "indicative", "form": "hablas"},
        {"pronoun": "él/ella/usted", "tense": "present", "mood": "indicative", "form": "habla"}
    ]
}
"#
    .trim();
}

pub fn meaning_fixture() -> &'static str {
    return r#"
{
    "verb": "comer",
    "english_meaning": "to eat",
    "example_sentence": "Comemos a las dos."
}
"#
    .trim();
}
