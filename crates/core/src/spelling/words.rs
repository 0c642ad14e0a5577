//! Canonical spellings paired with a common misspelling of each.

/// `(correct, misspelled)`
pub(crate) const WORD_PAIRS: &[(&str, &str)] = &[
    ("accommodate", "accomodate"),
    ("acquire", "aquire"),
    ("across", "accross"),
    ("address", "adress"),
    ("amateur", "amatuer"),
    ("apparent", "apparant"),
    ("argument", "arguement"),
    ("beginning", "begining"),
    ("believe", "beleive"),
    ("business", "buisness"),
    ("calendar", "calender"),
    ("category", "catagory"),
    ("cemetery", "cemetary"),
    ("colleague", "collegue"),
    ("coming", "comming"),
    ("committee", "commitee"),
    ("completely", "completly"),
    ("conscious", "concious"),
    ("consensus", "concensus"),
    ("definitely", "definately"),
    ("disappear", "dissapear"),
    ("disappoint", "dissapoint"),
    ("embarrass", "embarass"),
    ("environment", "enviroment"),
    ("exaggerate", "exagerate"),
    ("excellent", "excellant"),
    ("existence", "existance"),
    ("experience", "experiance"),
    ("familiar", "familar"),
    ("finally", "finaly"),
    ("foreign", "foriegn"),
    ("friend", "freind"),
    ("government", "goverment"),
    ("grammar", "grammer"),
    ("grateful", "greatful"),
    ("guarantee", "guarentee"),
    ("harass", "harrass"),
    ("height", "heighth"),
    ("hierarchy", "heirarchy"),
    ("humorous", "humourous"),
    ("ignorance", "ignorence"),
    ("immediate", "immediete"),
    ("independent", "independant"),
    ("intelligence", "intelligance"),
    ("jewelry", "jewlery"),
    ("judgment", "judgement"),
    ("knowledge", "knowlege"),
    ("leisure", "liesure"),
    ("library", "libary"),
    ("license", "lisence"),
    ("maintenance", "maintainance"),
    ("medieval", "medeval"),
    ("millennium", "millenium"),
    ("miniature", "minature"),
    ("mischievous", "mischevious"),
    ("necessary", "neccessary"),
    ("neighbor", "nieghbor"),
    ("noticeable", "noticable"),
    ("occasion", "occassion"),
    ("occurrence", "occurence"),
    ("parallel", "paralell"),
    ("particular", "particuler"),
    ("pastime", "passtime"),
    ("perceive", "percieve"),
    ("permanent", "permanant"),
    ("perseverance", "perseverence"),
    ("personnel", "personel"),
    ("possession", "posession"),
    ("preferred", "prefered"),
    ("privilege", "priviledge"),
    ("probably", "probaly"),
    ("profession", "proffession"),
    ("pronunciation", "pronounciation"),
    ("publicly", "publically"),
    ("questionnaire", "questionaire"),
    ("receive", "recieve"),
    ("recommend", "reccomend"),
    ("reference", "refrence"),
    ("relevant", "relevent"),
    ("religious", "religous"),
    ("remember", "rember"),
    ("repetition", "repitition"),
    ("restaurant", "restaraunt"),
    ("rhythm", "rythm"),
    ("schedule", "schedual"),
    ("separate", "seperate"),
    ("sergeant", "sargeant"),
    ("similar", "similiar"),
    ("sincerely", "sincerly"),
    ("special", "speciel"),
    ("succeed", "succede"),
    ("surprise", "suprise"),
    ("temperature", "temprature"),
    ("thorough", "thourgh"),
    ("tomorrow", "tommorrow"),
    ("truly", "truely"),
    ("until", "untill"),
    ("usually", "usally"),
    ("vacuum", "vaccum"),
    ("various", "varous"),
    ("vegetable", "vegatable"),
    ("Wednesday", "Wendsday"),
    ("weird", "wierd"),
    ("whether", "wether"),
    ("writing", "writting"),
];
