use super::*;

const DUNE_NFO: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?>
<movie>
    <title>Dune</title>
    <year>2021</year>
    <plot><![CDATA[Paul Atreides leads nomadic tribes in a battle to control the desert planet Arrakis.]]></plot>
    <outline>A noble family becomes embroiled in a war.</outline>
    <genre>Science Fiction</genre>
    <genre>Adventure</genre>
    <studio>Legendary Pictures</studio>
    <mpaa>PG-13</mpaa>
    <ratings>
        <rating name="imdb" max="10">
            <value>8.0</value>
            <votes>700000</votes>
        </rating>
        <rating name="themoviedb" max="10" default="true">
            <value>7.8</value>
        </rating>
    </ratings>
    <set tmdbcolid="726871">
        <name>Dune Collection</name>
        <overview>The saga of House Atreides.</overview>
    </set>
</movie>
"#;

#[test]
fn test_parse_full_nfo() {
    let nfo = parse_nfo(DUNE_NFO.as_bytes()).unwrap();
    assert_eq!(nfo.title.as_deref(), Some("Dune"));
    assert_eq!(nfo.year, Some(2021));
    assert_eq!(nfo.genres, vec!["Science Fiction", "Adventure"]);
    assert_eq!(nfo.studios, vec!["Legendary Pictures"]);
    assert_eq!(nfo.mpaa.as_deref(), Some("PG-13"));
    assert_eq!(nfo.rating, Some(7.8));
    assert_eq!(nfo.set_name.as_deref(), Some("Dune Collection"));
    assert_eq!(nfo.set_tmdb_id, Some(726871));
    assert!(nfo.plot.as_deref().unwrap().starts_with("Paul Atreides"));
}

#[test]
fn test_set_overview_wins_over_plot() {
    let nfo = parse_nfo(DUNE_NFO.as_bytes()).unwrap();
    let fields = nfo.fields();
    assert_eq!(fields.overview.as_deref(), Some("The saga of House Atreides."));
    assert_eq!(fields.tmdb_collection_id, Some(726871));
    assert_eq!(fields.content_rating.as_deref(), Some("PG-13"));
}

#[test]
fn test_old_style_set_and_plain_rating() {
    let xml = r#"<movie>
        <title>Alien</title>
        <premiered>1979-05-25</premiered>
        <rating>8.5</rating>
        <set>Alien Collection</set>
        <plot></plot>
        <outline>In space no one can hear you scream.</outline>
    </movie>"#;
    let nfo = parse_nfo(xml.as_bytes()).unwrap();
    assert_eq!(nfo.set_name.as_deref(), Some("Alien Collection"));
    assert_eq!(nfo.year, Some(1979));
    assert_eq!(nfo.rating, Some(8.5));
    assert_eq!(nfo.plot, None);
    assert_eq!(
        nfo.fields().overview.as_deref(),
        Some("In space no one can hear you scream.")
    );
}

#[test]
fn test_missing_set_is_none() {
    let xml = "<movie><title>Heat</title><plot>Cops and robbers.</plot></movie>";
    let nfo = parse_nfo(xml.as_bytes()).unwrap();
    assert_eq!(nfo.set_name, None);
    assert_eq!(nfo.set_tmdb_id, None);
}

#[test]
fn test_empty_set_name_is_none() {
    let xml = "<movie><title>Heat</title><set><name>  </name></set></movie>";
    let nfo = parse_nfo(xml.as_bytes()).unwrap();
    assert_eq!(nfo.set_name, None);
}

#[test]
fn test_escaped_text_is_unescaped() {
    let xml = "<movie><title>Tom &amp; Jerry</title><set>Tom &amp; Jerry Collection</set></movie>";
    let nfo = parse_nfo(xml.as_bytes()).unwrap();
    assert_eq!(nfo.title.as_deref(), Some("Tom & Jerry"));
    assert_eq!(nfo.set_name.as_deref(), Some("Tom & Jerry Collection"));
}

#[test]
fn test_trailing_url_is_ignored() {
    let xml = "<movie><title>Heat</title></movie>\nhttps://www.themoviedb.org/movie/949\n";
    let nfo = parse_nfo(xml.as_bytes()).unwrap();
    assert_eq!(nfo.title.as_deref(), Some("Heat"));
}

#[test]
fn test_self_closing_movie_is_empty() {
    let nfo = parse_nfo("<movie/>".as_bytes()).unwrap();
    assert_eq!(nfo.title, None);
    assert_eq!(nfo.set_name, None);
}

#[test]
fn test_wrong_root_is_invalid() {
    let xml = "<tvshow><title>Dune: Prophecy</title></tvshow>";
    let err = parse_nfo(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, NfoError::InvalidNfo(_)));
}

#[test]
fn test_url_only_nfo_is_invalid() {
    let err = parse_nfo("https://www.imdb.com/title/tt0078748/".as_bytes()).unwrap_err();
    assert!(matches!(err, NfoError::InvalidNfo(_)));
}

#[test]
fn test_empty_input_is_invalid() {
    assert!(parse_nfo("".as_bytes()).is_err());
}

#[test]
fn test_truncated_nfo_is_error() {
    assert!(parse_nfo("<movie><title>Heat</title>".as_bytes()).is_err());
}

#[test]
fn test_parse_year() {
    assert_eq!(parse_year("1984"), Some(1984));
    assert_eq!(parse_year("1984-12-14"), Some(1984));
    assert_eq!(parse_year("84"), None);
    assert_eq!(parse_year("abcd"), None);
}
