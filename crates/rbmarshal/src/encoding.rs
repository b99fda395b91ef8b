//! Static bidirectional table of the encoding names known to the format.

/// Text-encoding designator carried by decoded strings.
///
/// Ids follow the format's registration order. The wire carries names
/// rather than ids; the ids exist for embedders that index by encoding.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Ascii8Bit = 0,
    Utf8,
    UsAscii,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
    Utf16,
    Utf32,
    Utf8Mac,
    EucJp,
    Windows31J,
    Big5,
    Big5Hkscs,
    Big5Uao,
    Cp949,
    EmacsMule,
    EucKr,
    EucTw,
    Gb2312,
    Gb18030,
    Gbk,
    Iso8859_1,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_5,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Iso8859_9,
    Iso8859_10,
    Iso8859_11,
    Iso8859_13,
    Iso8859_14,
    Iso8859_15,
    Iso8859_16,
    Koi8R,
    Koi8U,
    ShiftJis,
    Windows1250,
    Windows1251,
    Windows1252,
    Windows1253,
    Windows1254,
    Windows1257,
    Ibm437,
    Ibm737,
    Ibm775,
    Cp850,
    Ibm852,
    Cp852,
    Ibm855,
    Cp855,
    Ibm857,
    Ibm860,
    Ibm861,
    Ibm862,
    Ibm863,
    Ibm864,
    Ibm865,
    Ibm866,
    Ibm869,
    Windows1258,
    Gb1988,
    MacCentEuro,
    MacCroatian,
    MacCyrillic,
    MacGreek,
    MacIceland,
    MacRoman,
    MacRomania,
    MacThai,
    MacTurkish,
    MacUkraine,
    Cp950,
    Cp951,
    Ibm037,
    StatelessIso2022Jp,
    EucJpMs,
    Cp51932,
    EucJis2004,
    Gb12345,
    Iso2022Jp,
    Iso2022Jp2,
    Cp50220,
    Cp50221,
    Windows1256,
    Windows1255,
    Tis620,
    Windows874,
    MacJapanese,
    Utf7,
    Utf8DoCoMo,
    SjisDoCoMo,
    Utf8Kddi,
    SjisKddi,
    Iso2022JpKddi,
    StatelessIso2022JpKddi,
    Utf8SoftBank,
    SjisSoftBank,
}

/// Canonical rows first; the three wire-only shorthands sit at the end so
/// reverse lookup never returns them.
const NAMES: &[(&str, Encoding)] = &[
    ("ASCII-8BIT", Encoding::Ascii8Bit),
    ("UTF-8", Encoding::Utf8),
    ("US-ASCII", Encoding::UsAscii),
    ("UTF-16BE", Encoding::Utf16Be),
    ("UTF-16LE", Encoding::Utf16Le),
    ("UTF-32BE", Encoding::Utf32Be),
    ("UTF-32LE", Encoding::Utf32Le),
    ("UTF-16", Encoding::Utf16),
    ("UTF-32", Encoding::Utf32),
    ("UTF8-MAC", Encoding::Utf8Mac),
    ("EUC-JP", Encoding::EucJp),
    ("Windows-31J", Encoding::Windows31J),
    ("Big5", Encoding::Big5),
    ("Big5-HKSCS", Encoding::Big5Hkscs),
    ("Big5-UAO", Encoding::Big5Uao),
    ("CP949", Encoding::Cp949),
    ("Emacs-Mule", Encoding::EmacsMule),
    ("EUC-KR", Encoding::EucKr),
    ("EUC-TW", Encoding::EucTw),
    ("GB2312", Encoding::Gb2312),
    ("GB18030", Encoding::Gb18030),
    ("GBK", Encoding::Gbk),
    ("ISO-8859-1", Encoding::Iso8859_1),
    ("ISO-8859-2", Encoding::Iso8859_2),
    ("ISO-8859-3", Encoding::Iso8859_3),
    ("ISO-8859-4", Encoding::Iso8859_4),
    ("ISO-8859-5", Encoding::Iso8859_5),
    ("ISO-8859-6", Encoding::Iso8859_6),
    ("ISO-8859-7", Encoding::Iso8859_7),
    ("ISO-8859-8", Encoding::Iso8859_8),
    ("ISO-8859-9", Encoding::Iso8859_9),
    ("ISO-8859-10", Encoding::Iso8859_10),
    ("ISO-8859-11", Encoding::Iso8859_11),
    ("ISO-8859-13", Encoding::Iso8859_13),
    ("ISO-8859-14", Encoding::Iso8859_14),
    ("ISO-8859-15", Encoding::Iso8859_15),
    ("ISO-8859-16", Encoding::Iso8859_16),
    ("KOI8-R", Encoding::Koi8R),
    ("KOI8-U", Encoding::Koi8U),
    ("Shift_JIS", Encoding::ShiftJis),
    ("Windows-1250", Encoding::Windows1250),
    ("Windows-1251", Encoding::Windows1251),
    ("Windows-1252", Encoding::Windows1252),
    ("Windows-1253", Encoding::Windows1253),
    ("Windows-1254", Encoding::Windows1254),
    ("Windows-1257", Encoding::Windows1257),
    ("IBM437", Encoding::Ibm437),
    ("IBM737", Encoding::Ibm737),
    ("IBM775", Encoding::Ibm775),
    ("CP850", Encoding::Cp850),
    ("IBM852", Encoding::Ibm852),
    ("CP852", Encoding::Cp852),
    ("IBM855", Encoding::Ibm855),
    ("CP855", Encoding::Cp855),
    ("IBM857", Encoding::Ibm857),
    ("IBM860", Encoding::Ibm860),
    ("IBM861", Encoding::Ibm861),
    ("IBM862", Encoding::Ibm862),
    ("IBM863", Encoding::Ibm863),
    ("IBM864", Encoding::Ibm864),
    ("IBM865", Encoding::Ibm865),
    ("IBM866", Encoding::Ibm866),
    ("IBM869", Encoding::Ibm869),
    ("Windows-1258", Encoding::Windows1258),
    ("GB1988", Encoding::Gb1988),
    ("macCentEuro", Encoding::MacCentEuro),
    ("macCroatian", Encoding::MacCroatian),
    ("macCyrillic", Encoding::MacCyrillic),
    ("macGreek", Encoding::MacGreek),
    ("macIceland", Encoding::MacIceland),
    ("macRoman", Encoding::MacRoman),
    ("macRomania", Encoding::MacRomania),
    ("macThai", Encoding::MacThai),
    ("macTurkish", Encoding::MacTurkish),
    ("macUkraine", Encoding::MacUkraine),
    ("CP950", Encoding::Cp950),
    ("CP951", Encoding::Cp951),
    ("IBM037", Encoding::Ibm037),
    ("stateless-ISO-2022-JP", Encoding::StatelessIso2022Jp),
    ("eucJP-ms", Encoding::EucJpMs),
    ("CP51932", Encoding::Cp51932),
    ("EUC-JIS-2004", Encoding::EucJis2004),
    ("GB12345", Encoding::Gb12345),
    ("ISO-2022-JP", Encoding::Iso2022Jp),
    ("ISO-2022-JP-2", Encoding::Iso2022Jp2),
    ("CP50220", Encoding::Cp50220),
    ("CP50221", Encoding::Cp50221),
    ("Windows-1256", Encoding::Windows1256),
    ("Windows-1255", Encoding::Windows1255),
    ("TIS-620", Encoding::Tis620),
    ("Windows-874", Encoding::Windows874),
    ("MacJapanese", Encoding::MacJapanese),
    ("UTF-7", Encoding::Utf7),
    ("UTF8-DoCoMo", Encoding::Utf8DoCoMo),
    ("SJIS-DoCoMo", Encoding::SjisDoCoMo),
    ("UTF8-KDDI", Encoding::Utf8Kddi),
    ("SJIS-KDDI", Encoding::SjisKddi),
    ("ISO-2022-JP-KDDI", Encoding::Iso2022JpKddi),
    ("stateless-ISO-2022-JP-KDDI", Encoding::StatelessIso2022JpKddi),
    ("UTF8-SoftBank", Encoding::Utf8SoftBank),
    ("SJIS-SoftBank", Encoding::SjisSoftBank),
    // Shorthands used only inside instance-variable pairs on the wire.
    ("", Encoding::Ascii8Bit),
    ("T", Encoding::Utf8),
    ("F", Encoding::UsAscii),
];

impl Encoding {
    /// Looks up an encoding by name, accepting the wire shorthands.
    pub fn from_name(name: &str) -> Option<Encoding> {
        NAMES.iter().find(|(n, _)| *n == name).map(|(_, e)| *e)
    }

    /// Looks up an encoding by the raw name bytes carried on the wire.
    pub fn from_wire(name: &[u8]) -> Option<Encoding> {
        std::str::from_utf8(name).ok().and_then(Encoding::from_name)
    }

    /// Canonical name of this encoding.
    pub fn name(self) -> &'static str {
        match NAMES.iter().find(|(_, e)| *e == self) {
            Some((name, _)) => name,
            None => unreachable!("every encoding has a canonical row"),
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Encoding> {
        NAMES.iter().map(|(_, e)| *e).find(|e| e.id() == id)
    }
}
