use super::*;

// -----------------------------------------------------------------------
// decode_entities
// -----------------------------------------------------------------------

#[test]
fn decodes_table_entities() {
    assert_eq!(
        decode_entities("Tom &amp; Jerry&#8217;s &#8220;show&#8221; &ndash; &#8212; &#038; &lt;b&gt;"),
        "Tom & Jerry's \"show\" \u{2013} \u{2014} & <b>"
    );
}

#[test]
fn unknown_entities_pass_through() {
    assert_eq!(decode_entities("&copy; 2024 &#9731;"), "&copy; 2024 &#9731;");
}

#[test]
fn decoding_is_single_pass() {
    assert_eq!(decode_entities("&amp;lt;p&amp;gt;"), "&lt;p&gt;");
}

#[test]
fn literal_curly_quotes_fold_to_ascii() {
    assert_eq!(
        decode_entities("Dal\u{2019}s \u{201C}big\u{201D} \u{2018}win\u{2019}"),
        "Dal's \"big\" 'win'"
    );
}

#[test]
fn escaped_and_unescaped_quotes_normalize_alike() {
    assert_eq!(
        normalize_content("Dal&#8217;s rink opens.").content,
        normalize_content("Dal\u{2019}s rink opens.").content
    );
}

#[test]
fn decodes_hex_entities() {
    assert_eq!(decode_entities("&#x2019;&#X201C;"), "'\"");
}

// -----------------------------------------------------------------------
// normalize_content
// -----------------------------------------------------------------------

#[test]
fn empty_input_yields_empty_output() {
    assert_eq!(normalize_content(""), NormalizedContent::default());
    assert_eq!(normalize_content("  \n\t "), NormalizedContent::default());
}

#[test]
fn paragraph_tags_become_blank_line_separators() {
    let raw = "<p>First paragraph here.</p>\n<p>Second <b>bold</b> and <a href=\"/x\">link</a>.</p>";
    let out = normalize_content(raw);
    assert_eq!(
        out.content,
        "First paragraph here.\n\nSecond <strong>bold</strong> and link."
    );
    assert_eq!(out.excerpt, "First paragraph here. Second bold and link.");
}

#[test]
fn scripts_and_styles_are_removed_with_their_contents() {
    let raw = "<p>Hello world story.</p><script>alert('x')</script><style>p { color: red }</style><!-- note --><p>Bye now.</p>";
    let out = normalize_content(raw);
    assert_eq!(out.content, "Hello world story.\n\nBye now.");
}

#[test]
fn inline_tags_map_to_canonical_form() {
    let raw = "<p>Some <B class=\"x\">bold</B>, <i>it</i>, <em>em</em></p>\
               <ul><li>a</li></ul><blockquote cite=\"q\">quote</blockquote>\
               <img src=\"a.jpg\"><span>kept</span>";
    let out = normalize_content(raw);
    assert!(out.content.contains("<strong>bold</strong>"), "{}", out.content);
    assert!(out.content.contains("<em>it</em>"), "{}", out.content);
    assert!(out.content.contains("<ul><li>a</li></ul>"), "{}", out.content);
    assert!(out.content.contains("<blockquote>quote</blockquote>"), "{}", out.content);
    assert!(out.content.ends_with("kept"), "{}", out.content);
    assert!(!out.content.contains("img"));
    assert!(!out.content.contains("span"));
    assert!(!out.content.contains("class="));
}

#[test]
fn blank_line_runs_split_flat_text() {
    let out = normalize_content("First block line.\n   \n\n\nSecond block line.");
    assert_eq!(out.content, "First block line.\n\nSecond block line.");
}

#[test]
fn horizontal_whitespace_collapses() {
    let out = normalize_content("<p>Lots   of \t spaces here</p><p>Next</p>");
    assert_eq!(out.content, "Lots of spaces here\n\nNext");
}

#[test]
fn flat_text_is_grouped_three_sentences_per_paragraph() {
    let out = normalize_content(
        "One is here. Two is here. Three is here. Four is here. Five is here.",
    );
    assert_eq!(
        out.content,
        "One is here. Two is here. Three is here.\n\nFour is here. Five is here."
    );
}

#[test]
fn quoted_sentence_closes_its_paragraph() {
    let out = normalize_content(
        "Budget season began. She said \"no cuts\" again. Staff agreed. Talks continue. More soon.",
    );
    assert_eq!(
        out.content,
        "Budget season began. She said \"no cuts\" again.\n\nStaff agreed. Talks continue. More soon."
    );
}

#[test]
fn leading_quote_gets_its_own_paragraph() {
    let out = normalize_content(
        "The mayor said &#8220;we will act&#8221; today. The council met. Members debated. Voting is next week.",
    );
    let paragraphs: Vec<&str> = out.content.split("\n\n").collect();
    assert!(paragraphs.len() >= 2, "{}", out.content);
    assert_eq!(paragraphs[0], "The mayor said \"we will act\" today.");
}

#[test]
fn list_item_is_not_split_across_paragraphs() {
    let out = normalize_content(
        "<ul><li>First point here. Second point here. Third point here. Fourth point here.</li></ul>",
    );
    assert_eq!(
        out.content,
        "<ul><li>First point here. Second point here. Third point here. Fourth point here.</li></ul>"
    );
}

#[test]
fn paragraph_break_resumes_after_closed_element() {
    let out = normalize_content(
        "<blockquote>One said \"yes\" loudly. Two agreed. Three left.</blockquote> After one. After two. After three.",
    );
    let paragraphs: Vec<&str> = out.content.split("\n\n").collect();
    assert_eq!(
        paragraphs,
        vec![
            "<blockquote>One said \"yes\" loudly. Two agreed. Three left.</blockquote> After one.",
            "After two. After three.",
        ]
    );
}

#[test]
fn sentence_split_respects_closing_quotes() {
    let sentences = split_sentences("He said \"stop.\" Then left! Why? Nobody knows");
    assert_eq!(
        sentences,
        vec!["He said \"stop.\"", "Then left!", "Why?", "Nobody knows"]
    );
}

#[test]
fn non_empty_body_always_has_content() {
    let out = normalize_content("<div>Just one line of text</div>");
    assert_eq!(out.content, "Just one line of text");
    assert_eq!(out.excerpt, "Just one line of text");
}

#[test]
fn normalization_is_deterministic() {
    let raw = "<p>Dal&#8217;s senate met.</p><p>It voted &amp; adjourned. Then it left.</p>";
    assert_eq!(normalize_content(raw), normalize_content(raw));
}

// -----------------------------------------------------------------------
// excerpts and placeholders
// -----------------------------------------------------------------------

#[test]
fn excerpt_is_truncated_with_ellipsis() {
    let raw = "word ".repeat(100);
    let out = normalize_content(&raw);
    assert!(out.excerpt.ends_with("..."), "{}", out.excerpt);
    assert!(out.excerpt.chars().count() <= EXCERPT_MAX_CHARS + 3);
    assert!(!out.excerpt.contains('\n'));
}

#[test]
fn short_excerpt_is_not_suffixed() {
    assert_eq!(make_excerpt("Short text."), "Short text.");
}

#[test]
fn excerpt_truncation_counts_characters_not_bytes() {
    let raw = "é".repeat(250);
    let excerpt = make_excerpt(&raw);
    assert_eq!(excerpt.chars().count(), EXCERPT_MAX_CHARS + 3);
}

#[test]
fn excerpt_strips_canonical_tags() {
    assert_eq!(
        make_excerpt("<strong>Bold</strong> start.\n\n<em>Next</em> para."),
        "Bold start. Next para."
    );
}

#[test]
fn placeholder_uses_title_for_both_fields() {
    let out = placeholder_content("Senate passes new budget motion");
    assert_eq!(out.content, "Senate passes new budget motion");
    assert_eq!(out.excerpt, out.content);
}

#[test]
fn placeholder_truncates_long_titles() {
    let title = "x".repeat(200);
    let out = placeholder_content(&title);
    assert_eq!(out.excerpt.chars().count(), PLACEHOLDER_MAX_CHARS + 3);
    assert!(out.excerpt.ends_with("..."));
}
