// src/services/catalog_service.rs
//
// Acervo estático de filmes/séries e agenda simulada de jogos do dia.
// Servem de ponto de partida para os banners; nada aqui vai ao armazenamento.

use chrono::{DateTime, Days, Utc};

use crate::models::content::{CatalogEntry, ContentKind, ContentResult, FootballMatch, MatchStatus};

pub const MIN_SEARCH_LEN: usize = 2;
pub const MAX_SEARCH_RESULTS: usize = 8;

const fn entry(key: &'static str, title: &'static str, synopsis: &'static str, image_url: &'static str) -> CatalogEntry {
    CatalogEntry {
        key,
        title,
        synopsis,
        image_url,
    }
}

pub const MOVIES: &[CatalogEntry] = &[
    entry(
        "casablanca",
        "Casablanca",
        "Durante a Segunda Guerra Mundial, um americano expatriado encontra sua antiga amante em seu nightclub em Casablanca.",
        "https://images.unsplash.com/photo-1489599511986-c6b3c9c5b1c8?w=800&h=1200&fit=crop",
    ),
    entry(
        "cidadao kane",
        "Cidadão Kane",
        "A ascensão e queda de um magnata da mídia americana, contada através das memórias de pessoas que o conheceram.",
        "https://images.unsplash.com/photo-1440404653325-ab127d49abc1?w=800&h=1200&fit=crop",
    ),
    entry(
        "poderoso chefao",
        "O Poderoso Chefão",
        "A saga da família Corleone, uma das mais poderosas famílias da máfia italiana-americana.",
        "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=800&h=1200&fit=crop",
    ),
    entry(
        "tubarao",
        "Tubarão",
        "Um tubarão gigante aterroriza uma cidade litorânea durante o verão.",
        "https://images.unsplash.com/photo-1544551763-46a013bb70d5?w=800&h=1200&fit=crop",
    ),
    entry(
        "de volta para o futuro",
        "De Volta Para o Futuro",
        "Um adolescente viaja acidentalmente no tempo e deve garantir que seus pais se apaixonem.",
        "https://images.unsplash.com/photo-1518676590629-3dcbd9c5a5c9?w=800&h=1200&fit=crop",
    ),
    entry(
        "et",
        "E.T. - O Extraterrestre",
        "Um menino faz amizade com um alienígena perdido na Terra.",
        "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=1200&fit=crop",
    ),
    entry(
        "jurassic park",
        "Jurassic Park",
        "Dinossauros são trazidos de volta à vida em um parque temático que sai de controle.",
        "https://images.unsplash.com/photo-1551698618-1dfe5d97d256?w=800&h=1200&fit=crop",
    ),
    entry(
        "titanic",
        "Titanic",
        "Um romance épico ambientado durante a viagem inaugural do RMS Titanic.",
        "https://images.unsplash.com/photo-1574629810360-7efbbe195018?w=800&h=1200&fit=crop",
    ),
    entry(
        "senhor dos aneis",
        "O Senhor dos Anéis: A Sociedade do Anel",
        "Um hobbit embarca em uma jornada épica para destruir um anel poderoso.",
        "https://images.unsplash.com/photo-1579952363873-27d3bfad9c0d?w=800&h=1200&fit=crop",
    ),
    entry(
        "matrix",
        "Matrix",
        "Um hacker descobre que a realidade é uma simulação controlada por máquinas.",
        "https://images.unsplash.com/photo-1518676590629-3dcbd9c5a5c9?w=800&h=1200&fit=crop",
    ),
    entry(
        "gladiador",
        "Gladiador",
        "Um general romano se torna gladiador para vingar a morte de sua família.",
        "https://images.unsplash.com/photo-1553778263-73a83bab9b0c?w=800&h=1200&fit=crop",
    ),
    entry(
        "avatar",
        "Avatar",
        "Um ex-marine paraplégico é enviado para a lua Pandora em uma missão única.",
        "https://images.unsplash.com/photo-1635805737707-575885ab0820?w=800&h=1200&fit=crop",
    ),
    entry(
        "vingadores",
        "Vingadores: Ultimato",
        "Os heróis remanescentes se unem para desfazer as ações de Thanos.",
        "https://images.unsplash.com/photo-1608889175250-c3b0c1667d3a?w=800&h=1200&fit=crop",
    ),
    entry(
        "pantera negra",
        "Pantera Negra",
        "T'Challa retorna para casa para assumir o trono de Wakanda.",
        "https://images.unsplash.com/photo-1551698618-1dfe5d97d256?w=800&h=1200&fit=crop",
    ),
    entry(
        "coringa",
        "Coringa",
        "A origem sombria do icônico vilão do Batman.",
        "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=800&h=1200&fit=crop",
    ),
    entry(
        "duna",
        "Duna",
        "Paul Atreides deve viajar para o planeta mais perigoso do universo.",
        "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=1200&fit=crop",
    ),
    entry(
        "top gun maverick",
        "Top Gun: Maverick",
        "Maverick retorna como instrutor de uma nova geração de pilotos.",
        "https://images.unsplash.com/photo-1540979388789-6cee28a1cdc9?w=800&h=1200&fit=crop",
    ),
    entry(
        "batman",
        "Batman",
        "Uma nova versão sombria do Cavaleiro das Trevas.",
        "https://images.unsplash.com/photo-1509347528160-9329d33b2588?w=800&h=1200&fit=crop",
    ),
    entry(
        "homem aranha",
        "Homem-Aranha: Sem Volta Para Casa",
        "Peter Parker enfrenta vilões de outras dimensões.",
        "https://images.unsplash.com/photo-1635863138275-d9864d3e8b5b?w=800&h=1200&fit=crop",
    ),
    entry(
        "avatar 2",
        "Avatar: O Caminho da Água",
        "Jake Sully e sua família enfrentam novas ameaças em Pandora.",
        "https://images.unsplash.com/photo-1635805737707-575885ab0820?w=800&h=1200&fit=crop",
    ),
];

pub const SERIES: &[CatalogEntry] = &[
    entry(
        "breaking bad",
        "Breaking Bad",
        "Um professor de química se torna fabricante de metanfetamina.",
        "https://images.unsplash.com/photo-1440404653325-ab127d49abc1?w=800&h=1200&fit=crop",
    ),
    entry(
        "game of thrones",
        "Game of Thrones",
        "Famílias nobres lutam pelo controle dos Sete Reinos.",
        "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=800&h=1200&fit=crop",
    ),
    entry(
        "lost",
        "Lost",
        "Sobreviventes de um acidente aéreo ficam presos em uma ilha misteriosa.",
        "https://images.unsplash.com/photo-1574629810360-7efbbe195018?w=800&h=1200&fit=crop",
    ),
    entry(
        "stranger things",
        "Stranger Things",
        "Crianças enfrentam forças sobrenaturais em uma pequena cidade.",
        "https://images.unsplash.com/photo-1518676590629-3dcbd9c5a5c9?w=800&h=1200&fit=crop",
    ),
    entry(
        "house of dragon",
        "House of the Dragon",
        "A história da Casa Targaryen 200 anos antes de Game of Thrones.",
        "https://images.unsplash.com/photo-1574629810360-7efbbe195018?w=800&h=1200&fit=crop",
    ),
    entry(
        "wednesday",
        "Wednesday",
        "Wednesday Addams navega pela vida estudantil na Academia Nevermore.",
        "https://images.unsplash.com/photo-1553778263-73a83bab9b0c?w=800&h=1200&fit=crop",
    ),
    entry(
        "the boys",
        "The Boys",
        "Vigilantes lutam contra super-heróis corruptos.",
        "https://images.unsplash.com/photo-1579952363873-27d3bfad9c0d?w=800&h=1200&fit=crop",
    ),
    entry(
        "euphoria",
        "Euphoria",
        "Adolescentes navegam por drogas, sexo e identidade.",
        "https://images.unsplash.com/photo-1574629810360-7efbbe195018?w=800&h=1200&fit=crop",
    ),
    entry(
        "round 6",
        "Round 6",
        "Jogadores falidos competem em jogos infantis mortais.",
        "https://images.unsplash.com/photo-1635863138275-d9864d3e8b5b?w=800&h=1200&fit=crop",
    ),
    entry(
        "the witcher",
        "The Witcher",
        "Geralt de Rivia, um caçador de monstros, busca seu destino.",
        "https://images.unsplash.com/photo-1518676590629-3dcbd9c5a5c9?w=800&h=1200&fit=crop",
    ),
];

fn entries(kind: ContentKind) -> &'static [CatalogEntry] {
    match kind {
        ContentKind::Movie => MOVIES,
        ContentKind::Series => SERIES,
    }
}

fn entry_matches(entry: &CatalogEntry, term: &str) -> bool {
    entry.key.contains(term) || entry.title.to_lowercase().contains(term)
}

/// Busca em tempo real: filmes primeiro, depois séries, no máximo 8.
/// Menos de 2 caracteres não busca nada.
pub fn search(query: &str) -> Vec<ContentResult> {
    let term = query.trim().to_lowercase();
    if term.chars().count() < MIN_SEARCH_LEN {
        return Vec::new();
    }

    [ContentKind::Movie, ContentKind::Series]
        .into_iter()
        .flat_map(|kind| {
            entries(kind)
                .iter()
                .filter(|e| entry_matches(e, &term))
                .map(move |e| ContentResult::from_entry(kind, e))
                .collect::<Vec<_>>()
        })
        .take(MAX_SEARCH_RESULTS)
        .collect()
}

/// Preenche título/sinopse/imagem a partir de um título digitado.
///
/// Tenta o trecho inteiro; se nada bater, qualquer palavra serve.
pub fn lookup(title: &str, kind: ContentKind) -> Option<ContentResult> {
    let term = title.trim().to_lowercase();
    if term.is_empty() {
        return None;
    }
    let catalog = entries(kind);

    catalog
        .iter()
        .find(|e| entry_matches(e, &term))
        .or_else(|| {
            let words: Vec<&str> = term.split_whitespace().collect();
            catalog
                .iter()
                .find(|e| words.iter().any(|w| entry_matches(e, w)))
        })
        .map(|e| ContentResult::from_entry(kind, e))
}

struct Fixture {
    home: &'static str,
    away: &'static str,
    kickoff: &'static str,
    stadium: &'static str,
    banner_image_url: &'static str,
    tomorrow: bool,
}

const CHAMPIONSHIP: &str = "Campeonato Brasileiro";

const FIXTURES: &[Fixture] = &[
    Fixture {
        home: "Flamengo",
        away: "Palmeiras",
        kickoff: "16:00",
        stadium: "Maracanã",
        banner_image_url: "https://images.unsplash.com/photo-1574629810360-7efbbe195018?w=800&h=600&fit=crop",
        tomorrow: false,
    },
    Fixture {
        home: "Corinthians",
        away: "Santos",
        kickoff: "18:30",
        stadium: "Neo Química Arena",
        banner_image_url: "https://images.unsplash.com/photo-1551698618-1dfe5d97d256?w=800&h=600&fit=crop",
        tomorrow: false,
    },
    Fixture {
        home: "São Paulo",
        away: "Vasco",
        kickoff: "21:00",
        stadium: "Morumbi",
        banner_image_url: "https://images.unsplash.com/photo-1553778263-73a83bab9b0c?w=800&h=600&fit=crop",
        tomorrow: false,
    },
    Fixture {
        home: "Botafogo",
        away: "Fluminense",
        kickoff: "19:00",
        stadium: "Nilton Santos",
        banner_image_url: "https://images.unsplash.com/photo-1574629810360-7efbbe195018?w=800&h=600&fit=crop",
        tomorrow: true,
    },
    Fixture {
        home: "Grêmio",
        away: "Internacional",
        kickoff: "16:30",
        stadium: "Arena do Grêmio",
        banner_image_url: "https://images.unsplash.com/photo-1579952363873-27d3bfad9c0d?w=800&h=600&fit=crop",
        tomorrow: true,
    },
    Fixture {
        home: "Atlético-MG",
        away: "Cruzeiro",
        kickoff: "20:00",
        stadium: "Arena MRV",
        banner_image_url: "https://images.unsplash.com/photo-1574629810360-7efbbe195018?w=800&h=600&fit=crop",
        tomorrow: true,
    },
];

/// Agenda simulada de hoje e amanhã (datas em UTC), filtrada por time ou campeonato.
pub fn matches(now: DateTime<Utc>, query: Option<&str>) -> Vec<FootballMatch> {
    let today = now.date_naive();
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    let term = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();

    FIXTURES
        .iter()
        .enumerate()
        .filter(|(_, f)| {
            term.is_empty()
                || f.home.to_lowercase().contains(&term)
                || f.away.to_lowercase().contains(&term)
                || CHAMPIONSHIP.to_lowercase().contains(&term)
        })
        .map(|(i, f)| FootballMatch {
            id: (i + 1).to_string(),
            home: f.home.to_string(),
            away: f.away.to_string(),
            date: if f.tomorrow { tomorrow } else { today },
            kickoff: f.kickoff.to_string(),
            championship: CHAMPIONSHIP.to_string(),
            stadium: f.stadium.to_string(),
            status: MatchStatus::Scheduled,
            banner_image_url: f.banner_image_url.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn catalog_sizes() {
        assert_eq!(MOVIES.len(), 20);
        assert_eq!(SERIES.len(), 10);
    }

    #[test]
    fn short_queries_return_nothing() {
        assert!(search("a").is_empty());
        assert!(search("  ").is_empty());
    }

    #[test]
    fn search_matches_title_or_key() {
        let keys: Vec<String> = search("avatar").into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["avatar", "avatar 2"]);

        // "chefao" só existe na chave, o título tem acento
        let chefao = search("chefao");
        assert_eq!(chefao.len(), 1);
        assert_eq!(chefao[0].title, "O Poderoso Chefão");
    }

    #[test]
    fn search_is_capped_at_eight() {
        let results = search("a ");
        assert!(results.len() <= MAX_SEARCH_RESULTS);
        assert!(search("an").len() <= MAX_SEARCH_RESULTS);
    }

    #[test]
    fn search_spans_movies_and_series() {
        let results = search("thrones");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, ContentKind::Series);
    }

    #[test]
    fn lookup_falls_back_to_keywords() {
        let direct = lookup("Matrix", ContentKind::Movie).unwrap();
        assert_eq!(direct.key, "matrix");

        let fallback = lookup("batman begins", ContentKind::Movie).unwrap();
        assert_eq!(fallback.key, "batman");

        assert!(lookup("zzzz", ContentKind::Series).is_none());
        assert!(lookup("", ContentKind::Movie).is_none());
    }

    #[test]
    fn matches_today_and_tomorrow() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 15, 0, 0).unwrap();
        let all = matches(now, None);
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(all[5].date, NaiveDate::from_ymd_opt(2024, 1, 11).unwrap());

        let flamengo = matches(now, Some("FLAMENGO"));
        assert_eq!(flamengo.len(), 1);
        assert_eq!(flamengo[0].away, "Palmeiras");

        assert_eq!(matches(now, Some("brasileiro")).len(), 6);
        assert!(matches(now, Some("barcelona")).is_empty());
    }
}
