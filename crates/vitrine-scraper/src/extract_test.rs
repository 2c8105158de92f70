use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::*;

const ORIGIN: &str = "https://loja.example.com.br";

fn narrow() -> ExtractOptions {
    ExtractOptions {
        image_scan_radius: 60,
    }
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("valid decimal literal")
}

const TWO_PRIMARY_BLOCKS: &str = r#"
<div class="vitrine">
  <div class="produto">
    <img src="/static/logo.png">
    <a href="/produto/anel-sol"><img src="/img/product-1.jpg"></a>
    <h3>Anel Sol</h3>
    <span>R$ 1.234,56</span>
  </div>
  <div class="produto">
    <a href="/produto/anel-lua"><img src="https://cdn.example.com/product-2.jpg"></a>
    <h3>Anel Lua</h3>
    <span>R$ 49,90</span>
  </div>
</div>
"#;

const TWO_FALLBACK_BLOCKS: &str = r#"
<ul class="grade">
  <li><a href="/produto/anel-a"><img alt="Anel Aurora" src="/img/a.jpg"></a><span>R$ 89,90</span></li>
  <li><a href="/produto/anel-b"><img alt="Anel Brisa" src="/img/b.jpg"></a><span>R$ 120,00</span></li>
</ul>
"#;

// -----------------------------------------------------------------------
// tier selection
// -----------------------------------------------------------------------

#[test]
fn page_without_products_reports_none() {
    let result = extract("<html><body><p>Nada por aqui</p></body></html>", ORIGIN);
    assert!(result.records.is_empty());
    assert_eq!(result.strategy_used, ExtractionStrategy::None);
    assert_eq!(result.raw_match_count, 0);
    assert_eq!(result.skipped, 0);
}

#[test]
fn malformed_markup_never_fails() {
    for html in [
        "",
        "<<<>>>&&&",
        r#"<div><a href="/produto/q"<h3>Anel Q</h3>R$ 5,00</div></span></table>"#,
        "<a href=\"/produto/",
    ] {
        let result = extract(html, ORIGIN);
        assert!(result.records.len() <= 1, "unexpected records for {html:?}");
    }
}

#[test]
fn primary_blocks_yield_records_in_document_order() {
    let result = extract_with(TWO_PRIMARY_BLOCKS, &Normalizer::new(ORIGIN), narrow());

    assert_eq!(result.strategy_used, ExtractionStrategy::Primary);
    assert_eq!(result.raw_match_count, 2);
    assert_eq!(result.records.len(), 2);

    let sol = &result.records[0];
    assert_eq!(sol.name, "Sol");
    assert_eq!(sol.price, dec("1234.56"));
    assert_eq!(sol.source_url, "https://loja.example.com.br/produto/anel-sol");

    let lua = &result.records[1];
    assert_eq!(lua.name, "Lua");
    assert_eq!(lua.price, dec("49.90"));
}

#[test]
fn logo_images_are_excluded_from_primary_records() {
    let result = extract_with(TWO_PRIMARY_BLOCKS, &Normalizer::new(ORIGIN), narrow());

    let expected: BTreeSet<String> =
        ["https://loja.example.com.br/img/product-1.jpg".to_string()].into();
    assert_eq!(result.records[0].images, expected);

    let expected: BTreeSet<String> = ["https://cdn.example.com/product-2.jpg".to_string()].into();
    assert_eq!(result.records[1].images, expected);
}

#[test]
fn fallback_runs_when_primary_matches_nothing() {
    let result = extract(TWO_FALLBACK_BLOCKS, ORIGIN);

    assert_eq!(result.strategy_used, ExtractionStrategy::Fallback);
    assert_eq!(result.raw_match_count, 2);
    assert_eq!(result.records.len(), 2);
    assert!(result.records.iter().all(|r| r.images.is_empty()));
    assert_eq!(result.records[0].name, "Aurora");
    assert_eq!(result.records[1].name, "Brisa");
    assert_eq!(result.records[1].price, dec("120.00"));
}

#[test]
fn primary_match_suppresses_fallback_entirely() {
    let html = r#"
        <div><a href="/produto/x"><img alt="Anel Xis"></a><h2>Anel Xis</h2><p>R$ 10,00</p></div>
        <div><a href="/produto/y"><img alt="Anel Ypsilon"></a><p>R$ 20,00</p></div>
    "#;
    let result = extract(html, ORIGIN);

    assert_eq!(result.strategy_used, ExtractionStrategy::Primary);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].name, "Xis");
}

#[test]
fn several_links_into_one_block_produce_one_candidate() {
    let html = r#"<div class="card"><a href="/produto/x"><img src="/x.jpg"></a><h3><a href="/produto/x">Anel X</a></h3><span>R$ 10,00</span></div>"#;
    let set = extract_candidates(html, ExtractOptions::default());

    assert_eq!(set.strategy, ExtractionStrategy::Primary);
    assert_eq!(set.raw_match_count, 1);
    assert_eq!(set.candidates.len(), 1);
    assert_eq!(set.candidates[0].image_urls, vec!["/x.jpg".to_string()]);
}

#[test]
fn navigation_link_to_same_product_does_not_claim_page_block() {
    let padding = "x".repeat(3000);
    let html = format!(
        r#"<body>
             <nav><a href="/produto/a"><img src="/nav-banner.jpg"></a></nav>
             <p>{padding}</p>
             <div class="card"><a href="/produto/a"><img src="/real.jpg"></a><h3>Anel Aurora</h3><span>R$ 79,90</span></div>
           </body>"#
    );
    let set = extract_candidates(&html, ExtractOptions::default());

    assert_eq!(set.strategy, ExtractionStrategy::Primary);
    assert_eq!(set.raw_match_count, 1);
    assert_eq!(set.candidates.len(), 1);
    assert_eq!(set.candidates[0].name, "Aurora");
    assert_eq!(set.candidates[0].image_urls, vec!["/real.jpg".to_string()]);
}

#[test]
fn old_price_between_link_and_heading_is_ignored() {
    let html = r#"<div><a href="/produto/a">Anel Aurora</a><s>R$ 99,90</s><h3>Anel Aurora</h3><span>R$ 79,90</span></div>"#;
    let result = extract(html, ORIGIN);

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].price, dec("79.90"));
}

// -----------------------------------------------------------------------
// candidate fields
// -----------------------------------------------------------------------

#[test]
fn candidates_keep_raw_fields() {
    let set = extract_candidates(TWO_PRIMARY_BLOCKS, narrow());
    let first = &set.candidates[0];
    assert_eq!(first.name, "Sol");
    assert_eq!(first.price_text, "R$ 1.234,56");
    assert_eq!(first.source_url, "/produto/anel-sol");
    assert_eq!(first.image_urls, vec!["/img/product-1.jpg".to_string()]);
}

#[test]
fn empty_name_is_skipped_but_counted_as_raw_match() {
    let html = r#"<div><a href="/produto/x">ver</a><h3>   </h3><span>R$ 10,00</span></div>"#;
    let set = extract_candidates(html, ExtractOptions::default());

    assert!(set.candidates.is_empty());
    assert_eq!(set.strategy, ExtractionStrategy::None);
    assert_eq!(set.raw_match_count, 1);
}

#[test]
fn non_positive_price_counts_as_skipped() {
    let html = r#"
        <div><a href="/produto/a">a</a><h3>Anel Brinde</h3><span>R$ 0,00</span></div>
        <div><a href="/produto/b">b</a><h3>Anel Coral</h3><span>R$ 15,00</span></div>
    "#;
    let result = extract(html, ORIGIN);

    assert_eq!(result.strategy_used, ExtractionStrategy::Primary);
    assert_eq!(result.raw_match_count, 2);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.skipped, 1);
    assert_eq!(result.records[0].name, "Coral");
}

// -----------------------------------------------------------------------
// strip_category_prefix
// -----------------------------------------------------------------------

#[test]
fn category_prefix_is_stripped_case_insensitively() {
    assert_eq!(strip_category_prefix("Anel Solitário"), "Solitário");
    assert_eq!(strip_category_prefix("ANEL Solitário"), "Solitário");
    assert_eq!(strip_category_prefix("anel  Duplo"), "Duplo");
}

#[test]
fn category_prefix_requires_word_boundary() {
    assert_eq!(strip_category_prefix("Anelise"), "Anelise");
    assert_eq!(strip_category_prefix("Anel"), "Anel");
    assert_eq!(strip_category_prefix("Aliança Anel Ouro"), "Aliança Anel Ouro");
    assert_eq!(strip_category_prefix("Anél Prata"), "Anél Prata");
}

#[test]
fn default_options_use_default_radius() {
    assert_eq!(
        ExtractOptions::default().image_scan_radius,
        DEFAULT_IMAGE_SCAN_RADIUS
    );
}
