/// 網域清單版本，調整清單時遞增
pub const DOMAIN_SET_VERSION: u32 = 1;

/// Bitly 自家的短網址網域
pub const DEFAULT_DOMAINS: &[&str] = &["bit.ly", "bitly.com", "j.mp"];

/// 已知使用 Bitly 的品牌短網址網域
pub const EXTENDED_DOMAINS: &[&str] = &[
    "www.j.mp",
    "bitly.is",
    "on.fb.me",
    "amzn.to",
    "ebay.to",
    "apple.co",
    "urls.im",
    "aol.it",
    "atmlb.com",
    "bbc.in",
    "bhpho.to",
    "binged.it",
    "bloom.bg",
    "buff.ly",
    "cnet.co",
    "huff.to",
    "lat.ms",
    "nyr.kr",
    "nyti.ms",
    "n.pr",
    "pep.si",
    "win.gs",
    "pdora.co",
    "on.mtv.com",
    "on.vh1.com",
    "on.msnbc.com",
    "on.mash.to",
    "oreil.ly",
    "che.gg",
    "cs.pn",
    "politi.co",
    "tcrn.ch",
    "usat.ly",
    "wapo.st",
    "yhoo.it",
    "4sq.com",
    "abcn.ws",
    "abt.cm",
    "ind.pn",
    "es.pn",
    "chn.ge",
    "engt.co",
    "bzfd.it",
    "shebpr.es",
    "sforce.co",
    "pj.pizza",
    "b-gat.es",
    "m-gat.es",
    "theatln.tc",
    "go.nasa.gov",
    "1.usa.gov",
    "red.ht",
    "wef.ch",
    "vz.to",
];

#[derive(Debug, Clone, Copy)]
pub struct KnownDomainSet {
    pub version: u32,
    pub default: &'static [&'static str],
    pub extended: &'static [&'static str],
}

pub static KNOWN_DOMAINS: KnownDomainSet = KnownDomainSet {
    version: DOMAIN_SET_VERSION,
    default: DEFAULT_DOMAINS,
    extended: EXTENDED_DOMAINS,
};

impl KnownDomainSet {
    /// 大小寫敏感的精確比對
    pub fn is_shortener_domain(&self, host: &str) -> bool {
        self.default.contains(&host) || self.extended.contains(&host)
    }
}
