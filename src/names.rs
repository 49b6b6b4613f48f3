//! Display names for ids the game sends as bare numbers.

/// Full name of a driver the game knows by id.
pub fn driver_name(driver_id: u8) -> Option<&'static str> {
    Some(match driver_id {
        0 => "Carlos Sainz",
        1 => "Daniil Kvyat",
        2 => "Daniel Ricciardo",
        3 => "Fernando Alonso",
        4 => "Felipe Massa",
        6 => "Kimi Räikkönen",
        7 => "Lewis Hamilton",
        9 => "Max Verstappen",
        10 => "Nico Hulkenburg",
        11 => "Kevin Magnussen",
        12 => "Romain Grosjean",
        13 => "Sebastian Vettel",
        14 => "Sergio Perez",
        15 => "Valtteri Bottas",
        17 => "Esteban Ocon",
        19 => "Lance Stroll",
        20 => "Arron Barnes",
        21 => "Martin Giles",
        22 => "Alex Murray",
        23 => "Lucas Roth",
        24 => "Igor Correia",
        25 => "Sophie Levasseur",
        26 => "Jonas Schiffer",
        27 => "Alain Forest",
        28 => "Jay Letourneau",
        29 => "Esto Saari",
        30 => "Yasar Atiyeh",
        31 => "Callisto Calabresi",
        32 => "Naota Izum",
        33 => "Howard Clarke",
        34 => "Wilheim Kaufmann",
        35 => "Marie Laursen",
        36 => "Flavio Nieves",
        37 => "Peter Belousov",
        38 => "Klimek Michalski",
        39 => "Santiago Moreno",
        40 => "Benjamin Coppens",
        41 => "Noah Visser",
        42 => "Gert Waldmuller",
        43 => "Julian Quesada",
        44 => "Daniel Jones",
        45 => "Artem Markelov",
        46 => "Tadasuke Makino",
        47 => "Sean Gelael",
        48 => "Nyck De Vries",
        49 => "Jack Aitken",
        50 => "George Russell",
        51 => "Maximilian Günther",
        52 => "Nirei Fukuzumi",
        53 => "Luca Ghiotto",
        54 => "Lando Norris",
        55 => "Sérgio Sette Câmara",
        56 => "Louis Delétraz",
        57 => "Antonio Fuoco",
        58 => "Charles Leclerc",
        59 => "Pierre Gasly",
        62 => "Alexander Albon",
        63 => "Nicholas Latifi",
        64 => "Dorian Boccolacci",
        65 => "Niko Kari",
        66 => "Roberto Merhi",
        67 => "Arjun Maini",
        68 => "Alessio Lorandi",
        69 => "Ruben Meijer",
        70 => "Rashid Nair",
        71 => "Jack Tremblay",
        72 => "Devon Butler",
        73 => "Lukas Weber",
        74 => "Antonio Giovinazzi",
        75 => "Robert Kubica",
        76 => "Alain Prost",
        77 => "Ayrton Senna",
        78 => "Nobuharu Matsushita",
        79 => "Nikita Mazepin",
        80 => "Guanya Zhou",
        81 => "Mick Schumacher",
        82 => "Callum Ilott",
        83 => "Juan Manuel Correa",
        84 => "Jordan King",
        85 => "Mahaveer Raghunathan",
        86 => "Tatiana Calderon",
        87 => "Anthoine Hubert",
        88 => "Guiliano Alesi",
        89 => "Ralph Boschung",
        90 => "Michael Schumacher",
        91 => "Dan Ticktum",
        92 => "Marcus Armstrong",
        93 => "Christian Lundgaard",
        94 => "Yuki Tsunoda",
        95 => "Jehan Daruvala",
        96 => "Gulherme Samaia",
        97 => "Pedro Piquet",
        98 => "Felipe Drugovich",
        99 => "Robert Schwartzman",
        100 => "Roy Nissany",
        101 => "Marino Sato",
        102 => "Aidan Jackson",
        103 => "Casper Akkerman",
        109 => "Jenson Button",
        110 => "David Coulthard",
        111 => "Nico Rosberg",
        112 => "Oscar Piastri",
        113 => "Liam Lawson",
        114 => "Juri Vips",
        115 => "Theo Pourchaire",
        116 => "Richard Verschoor",
        117 => "Lirim Zendeli",
        118 => "David Beckmann",
        121 => "Alessio Deledda",
        122 => "Bent Viscaal",
        123 => "Enzo Fittipaldi",
        125 => "Mark Webber",
        126 => "Jacques Villeneuve",
        _ => return None,
    })
}

/// Circuit name for a track id. The game sends -1 for unknown tracks.
pub fn track_name(track_id: i8) -> Option<&'static str> {
    Some(match track_id {
        0 => "Albert Park Circuit",
        1 => "Circuit Paul Ricard",
        2 => "Shanghai International Circuit",
        3 => "Bahrain International Circuit",
        4 => "Circuit de Barcelona-Catalunya",
        5 => "Circuit de Monte Carlo",
        6 => "Circuit Gilles-Villeneuve",
        7 => "Silverstone Circuit",
        8 => "Hockenheimring",
        9 => "Hungaroring",
        10 => "Circuit Spa-Francorchamps",
        11 => "Autodromo Nazionale Monza",
        12 => "Marina Bay Circuit",
        13 => "Suzuka Circuit",
        14 => "Yas Marina Circuit",
        15 => "Circuit of the Americas",
        16 => "Autódromo José Carlos Pace",
        17 => "Red Bull Ring",
        18 => "Sochi Autodrom",
        19 => "Autódromo Hermanos Rodríguez",
        20 => "Baku City Circuit",
        21 => "Sakhir Short",
        22 => "Silverstone Short",
        23 => "Texas Short",
        24 => "Suzuka Short",
        25 => "Hanoi Circuit",
        26 => "Circuit Zandvoort",
        27 => "Autodromo Enzo e Dino Ferrari",
        28 => "Algarve International Circuit",
        29 => "Jeddah Corniche Circuit",
        30 => "Miami International Autodrome",
        _ => return None,
    })
}

/// Sentence fragment describing an infringement, e.g. "a minor collision".
pub fn infringement_text(infringement_type: u8) -> Option<&'static str> {
    Some(match infringement_type {
        0 => "blocking by slow driving",
        1 => "blocking by driving the wrong way",
        2 => "reversing off the start line",
        3 => "a severe collision",
        4 => "a minor collision",
        5 => "a collision and failure to relinquish a position",
        6 => "a collision and failure to relinquish multiple positions",
        7 => "corner cutting resulting in a time gain",
        8 => "corner cutting resulting in a single position gained",
        9 => "corner cutting resulting in multiple positions gained",
        10 => "crossing the pit exit lane",
        11 => "ignoring blue flags",
        12 => "ignoring yellow flags",
        13 => "ignoring a drive through",
        14 => "too many drive throughs",
        15 => "drive through reminder serve within n laps",
        16 => "drive through reminder serve this lap",
        17 => "pit lane speeding",
        18 => "parking for too long",
        19 => "ignoring tire regulations",
        20 => "being assessed too many penalties",
        21 => "multiple warnings",
        22 => "approaching disqualification",
        23 => "tire regulations select single",
        24 => "tire regulations select multiple",
        25 => "corner cutting",
        26 => "running wide",
        27 => "corner cutting with a minor time gain",
        28 => "corner cutting with a significant time gain",
        29 => "corner cutting with an extreme time gain",
        30 => "wall riding",
        31 => "using a flashback",
        32 => "resetting to the track",
        33 => "blocking the pit lane",
        34 => "a jump start",
        35 => "a safety car to car collision",
        36 => "a safety car illegal overtake",
        37 => "exceeding the allowed safety car pace",
        38 => "exceeding the allowed virtual safety car pace",
        39 => "being below the allowed formation lap speed",
        40 => "improper formation lap parking",
        41 => "retired mechanical failure",
        42 => "retired terminally damaged",
        43 => "falling too far back of the safety car",
        44 => "black flag timer",
        45 => "an unserved stop go penalty",
        46 => "an unserved drive through penalty",
        47 => "an engine component change",
        48 => "a gearbox change",
        49 => "a parc fermé change",
        50 => "a league grid penalty",
        51 => "a retry",
        52 => "an illegal time gain",
        53 => "a mandatory pitstop",
        54 => "attribute assigned",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_have_names() {
        assert_eq!(driver_name(14), Some("Sergio Perez"));
        assert_eq!(driver_name(6), Some("Kimi Räikkönen"));
        assert_eq!(track_name(7), Some("Silverstone Circuit"));
        assert_eq!(track_name(30), Some("Miami International Autodrome"));
        assert_eq!(infringement_text(17), Some("pit lane speeding"));
        assert_eq!(infringement_text(54), Some("attribute assigned"));
    }

    #[test]
    fn gaps_and_sentinels_have_no_name() {
        assert_eq!(driver_name(5), None);
        assert_eq!(driver_name(255), None);
        assert_eq!(track_name(-1), None);
        assert_eq!(track_name(31), None);
        assert_eq!(infringement_text(55), None);
    }
}
