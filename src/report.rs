//! Static HTML report rendering with embedded styling.

use crate::model::{EntityLink, ResolvedArtist};

const MUSICBRAINZ_SEARCH_URL: &str = "https://musicbrainz.org/search";
const WIKIDATA_ENTITY_BASE_URL: &str = "https://www.wikidata.org/wiki";

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5; }
h1 { color: #333; text-align: center; margin-bottom: 10px; }
.subtitle { text-align: center; color: #666; margin-bottom: 30px; }
.artist-table { width: 100%; border-collapse: collapse; background-color: white; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
th, td { padding: 12px; text-align: right; border-bottom: 1px solid #ddd; }
th { background-color: #e74c3c; color: white; font-weight: bold; }
tr:hover { background-color: #fff5f5; }
a { text-decoration: none; color: #0366d6; }
a:hover { text-decoration: underline; }
.musicbrainz-link { color: #EB743B; font-weight: bold; }
.stats { text-align: center; margin: 20px 0; color: #666; }
.wikidata-status { font-size: 0.9em; color: #888; }
.no-wikidata { color: #e74c3c; }
";

/// Language-specific encyclopedia URL for an article title.
pub fn article_url(language: &str, title: &str) -> String {
    format!(
        "https://{language}.wikipedia.org/wiki/{}",
        urlencoding::encode(title)
    )
}

/// Pre-filled MusicBrainz artist search URL for a display name.
pub fn musicbrainz_search_url(name: &str) -> String {
    format!(
        "{MUSICBRAINZ_SEARCH_URL}?query={}&type=artist&method=indexed",
        urlencoding::encode(name)
    )
}

/// Canonical Wikidata entity page URL.
pub fn wikidata_entity_url(entity_id: &str) -> String {
    format!("{WIKIDATA_ENTITY_BASE_URL}/{entity_id}")
}

/// Escapes free text for embedding in HTML element content and attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn wikidata_status_cell(link: &EntityLink) -> String {
    match link {
        EntityLink::Found(entity_id) => format!(
            "<a href=\"{}\" target=\"_blank\">{}</a>",
            wikidata_entity_url(entity_id),
            escape_html(entity_id)
        ),
        EntityLink::NotLinked => "<span class=\"no-wikidata\">אין מזהה</span>".to_string(),
        EntityLink::ResolutionFailed(_) => {
            "<span class=\"no-wikidata\">שגיאה</span>".to_string()
        }
    }
}

/// Renders the complete, self-contained report document for a title-sorted
/// result set. Rendering is pure: identical input yields identical output.
pub fn render_report(artists: &[ResolvedArtist], category: &str, language: &str) -> String {
    let escaped_category = escape_html(category);
    let mut html = format!(
        "<!DOCTYPE html>\n\
         <html lang=\"he\" dir=\"rtl\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{escaped_category} - אמנים ללא MusicBrainz</title>\n\
         <style>\n{STYLE}</style>\n\
         </head>\n\
         <body>\n\
         <h1>{escaped_category}</h1>\n\
         <div class=\"subtitle\">אמנים שאין להם מזהה MusicBrainz בוויקינתונים</div>\n\
         <div class=\"stats\">נמצאו {count} אמנים ללא מזהה MusicBrainz</div>\n\
         <table class=\"artist-table\">\n\
         <thead>\n\
         <tr>\n\
         <th>#</th>\n\
         <th>שם האמן</th>\n\
         <th>ויקיפדיה</th>\n\
         <th>ויקינתונים</th>\n\
         <th>הוסף ל-MusicBrainz</th>\n\
         </tr>\n\
         </thead>\n\
         <tbody>\n",
        count = artists.len()
    );

    for (index, artist) in artists.iter().enumerate() {
        let row = format!(
            "<tr>\n\
             <td>{row_index}</td>\n\
             <td>{name}</td>\n\
             <td><a href=\"{wiki_url}\" target=\"_blank\">לדף ויקיפדיה</a></td>\n\
             <td class=\"wikidata-status\">{wikidata_cell}</td>\n\
             <td><a href=\"{search_url}\" target=\"_blank\" class=\"musicbrainz-link\">חיפוש והוספה</a></td>\n\
             </tr>\n",
            row_index = index + 1,
            name = escape_html(&artist.title),
            wiki_url = article_url(language, &artist.title),
            wikidata_cell = wikidata_status_cell(&artist.link),
            search_url = musicbrainz_search_url(&artist.title),
        );
        html.push_str(&row);
    }

    html.push_str(
        "</tbody>\n\
         </table>\n\
         <div style=\"margin-top: 40px; text-align: center; color: #666;\">\n\
         <p>אמנים אלו לא נמצאו עם מזהה MusicBrainz (P434) בוויקינתונים.</p>\n\
         <p>ניתן לחפש אותם ב-MusicBrainz ולהוסיף את המזהה לוויקינתונים.</p>\n\
         </div>\n\
         </body>\n\
         </html>\n",
    );

    html
}
