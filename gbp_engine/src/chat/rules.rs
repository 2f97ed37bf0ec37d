//! The keyword table used by the chat responder.
//!
//! Rules are tried in order of their longest keyword, longest first, so that specific phrases beat the generic words
//! they contain. Rules with equally long keywords keep the order they have in [`RULES`].

/// A set of keywords and the reply given when any one of them appears as a whole word in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseRule {
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

impl ResponseRule {
    /// The length of the longest keyword. Rules with longer keywords are tried first.
    pub fn specificity(&self) -> usize {
        self.keywords.iter().map(|k| k.len()).max().unwrap_or(0)
    }
}

pub const GREETING_RESPONSE: &str = "Hello! Welcome to the Global Business Pay Visa card portal. How can I help \
    you with our cryptocurrency-powered Visa cards today?";

pub const ABOUT_RESPONSE: &str = "Global Business Pay offers premium Visa cards for international business \
    professionals. There are six card tiers, each with its own set of benefits, and every card can be paid for with \
    BNB, BTC, ETH or TRX at live market rates.";

pub const WEBSITE_RESPONSE: &str = "The site is organised into a few sections:\n\n• Home: an overview of our services \
    and featured cards\n• Cards: browse and compare every card\n• Benefits: the perks of each tier\n• Order: the \
    application and payment flow\n• Support: answers to common questions and our contact details\n\nYou can reach all \
    of them from the navigation menu at the top of every page.";

pub const CATALOGUE_RESPONSE: &str = "Global Business Pay offers 6 premium Visa cards:\n\n1. Basic Premium Visa ($500) \
    - essential benefits for everyday use\n2. Gold Visa ($1,000) - enhanced benefits for frequent travellers\n3. \
    Platinum Visa ($1,500) - premium benefits and higher limits\n4. World Visa ($2,000) - global acceptance with \
    exclusive perks\n5. World Elite Visa ($2,500) - our most prestigious card\n6. Business Visa ($3,000) - built for \
    company expenses\n\nThe Cards page shows every card priced in each cryptocurrency we accept.";

pub const WORLD_ELITE_RESPONSE: &str = "The World Elite Visa is our most prestigious card:\n• 5% cashback on all \
    purchases\n• Comprehensive travel protection\n• Unlimited concierge service\n• Access to exclusive events\n• No \
    preset spending limit\n\nIt costs $2,500, payable in any cryptocurrency we accept.";

pub const BASIC_PREMIUM_RESPONSE: &str = "The Basic Premium Visa is our entry-level card:\n• Global acceptance at \
    millions of merchants\n• Basic travel insurance\n• Fraud protection and 24/7 support\n• Online account \
    management\n\nAt $500 it is a good first card or a reliable secondary card.";

pub const ADMIN_RESPONSE: &str = "I'm sorry, but I can't help with administrative functions or back-office systems. \
    I'm here to help with our Visa cards. For administrative assistance, please contact our support team at \
    support@globalbusinesspay.com.";

pub const PRICING_RESPONSE: &str = "Each card has a fixed price in US dollars:\n\n• Basic Premium: $500\n• Gold: \
    $1,000\n• Platinum: $1,500\n• World: $2,000\n• World Elite: $2,500\n• Business: $3,000\n\nThe amount you pay is \
    that price converted into your chosen cryptocurrency at the current market rate, shown to 8 decimal places on the \
    Cards and Order pages.";

pub static RULES: &[ResponseRule] = &[
    ResponseRule {
        keywords: &["visa cards", "all cards", "types of cards", "compare cards", "card range"],
        response: CATALOGUE_RESPONSE,
    },
    ResponseRule { keywords: &["basic premium", "basic card", "entry level"], response: BASIC_PREMIUM_RESPONSE },
    ResponseRule {
        keywords: &["gold", "gold card", "gold visa"],
        response: "The Gold Visa ($1,000) is made for frequent business travellers:\n• 2% cashback on business \
                   purchases\n• Comprehensive travel insurance\n• Four airport lounge visits a year\n• No foreign \
                   transaction fees",
    },
    ResponseRule {
        keywords: &["platinum", "platinum card", "platinum visa"],
        response: "The Platinum Visa ($1,500) offers premium benefits and higher spending limits:\n• 3% cashback on \
                   travel and dining\n• Trip cancellation cover\n• Unlimited airport lounge access\n• A dedicated \
                   customer service line",
    },
    ResponseRule {
        keywords: &["world", "world card", "world visa"],
        response: "The World Visa ($2,000) is built for executives who do business internationally:\n• 4% cashback \
                   on international purchases\n• Global medical and evacuation insurance\n• VIP airport services\n• \
                   No preset spending limit",
    },
    ResponseRule {
        keywords: &["world elite", "elite", "elite card", "world elite visa"],
        response: WORLD_ELITE_RESPONSE,
    },
    ResponseRule {
        keywords: &["business", "business card", "business visa"],
        response: "The Business Visa ($3,000) is designed for company expenses:\n• Employee cards with individual \
                   limits\n• Detailed expense reporting\n• Accounting software integration\n• 3% cashback on office \
                   supplies and business services",
    },
    ResponseRule {
        keywords: &["price", "prices", "pricing", "cost", "fee", "fees", "how much", "what does it cost"],
        response: PRICING_RESPONSE,
    },
    ResponseRule {
        keywords: &["bnb", "binance", "crypto", "cryptocurrency", "payment", "pay", "buy with"],
        response: "We accept BNB (Binance Coin), BTC (Bitcoin), ETH (Ethereum) and TRX (Tron). Card prices are set in \
                   US dollars and converted at live market rates, so the amount you see on the Order page is exactly \
                   the amount to send to the wallet address shown there.",
    },
    ResponseRule {
        keywords: &["real-time", "rates", "current price", "exchange rates"],
        response: "Cryptocurrency prices are refreshed from the CoinGecko market data service every 5 minutes. If the \
                   service cannot be reached we keep quoting sensible default prices, so every card always has a \
                   valid price.",
    },
    ResponseRule {
        keywords: &["btc", "bitcoin", "eth", "ethereum", "trx", "tron"],
        response: "You can pay with BTC (Bitcoin), ETH (Ethereum), BNB (Binance Coin) or TRX (Tron). Pick your \
                   preferred currency on the Order page and the card price is converted at the current market rate.",
    },
    ResponseRule {
        keywords: &["benefit", "benefits", "perks", "features", "what do i get"],
        response: "Benefits depend on the card tier:\n\n• Worldwide acceptance\n• Cashback from 1% to 5%\n• Travel \
                   insurance that grows with the tier\n• Lounge access from Gold upwards\n• Concierge service from \
                   Platinum upwards\n• Fraud protection with zero liability\n\nThe Benefits page has the details for \
                   each card.",
    },
    ResponseRule {
        keywords: &["order", "buy", "purchase", "get", "how to get", "apply"],
        response: "To order a card:\n\n1. Choose a card on the Cards page\n2. Click \"Get This Card\"\n3. Fill in your \
                   name, email and account number\n4. Choose the cryptocurrency you want to pay with\n5. Send the \
                   amount shown to the wallet address shown\n6. Upload your payment receipt (JPEG, PNG or PDF, up to \
                   10 MB) and submit\n\nWe verify every payment by hand. The GlobalBusinessPay ID field is optional.",
    },
    ResponseRule {
        keywords: &["gbp id", "globalbusinesspay id", "id requirement"],
        response: "The GlobalBusinessPay ID field on the order form is optional. You can complete your order without \
                   it.",
    },
    ResponseRule {
        keywords: &["coingecko", "price api", "price updates", "api"],
        response: "We use the CoinGecko API for live cryptocurrency prices, refreshed every 5 minutes.",
    },
    ResponseRule {
        keywords: &["status", "order status", "track", "tracking", "where is my card"],
        response: "Every order starts as pending. Our team checks your payment receipt, usually within 1-2 business \
                   days, and then marks the order as verified. For an update, email support@globalbusinesspay.com \
                   with your order number.",
    },
    ResponseRule {
        keywords: &["support", "help", "contact", "assistance", "chat", "talk to someone"],
        response: "Our support team is available around the clock:\n\n• Live chat: right here\n• Email: \
                   support@globalbusinesspay.com\n• Phone: +1-800-BNB-VISA",
    },
    ResponseRule {
        keywords: &["time", "delivery", "receive", "shipping", "when will i get", "how long"],
        response: "Cards are shipped once your payment has been verified. Standard delivery takes 5-7 business days \
                   in North America, 7-10 in Europe, 10-14 in Asia and up to 21 elsewhere.",
    },
    ResponseRule {
        keywords: &["cancel", "cancellation", "refund", "money back"],
        response: "Orders can be cancelled with a full refund within 24 hours. After that, a partial refund is \
                   available until the card ships. Contact support@globalbusinesspay.com with your order number.",
    },
    ResponseRule {
        keywords: &["activate", "activation", "start using"],
        response: "Your card must be activated before use. Follow the instructions in your welcome pack, or call the \
                   activation number on the card sticker.",
    },
    ResponseRule {
        keywords: &["limit", "limits", "spending", "maximum", "how much can i spend"],
        response: "Monthly spending limits:\n\n• Basic Premium: $10,000\n• Gold: $25,000\n• Platinum: $50,000\n• \
                   World: $100,000\n• World Elite: set individually\n• Business: configurable per employee card",
    },
    ResponseRule {
        keywords: &["security", "secure", "safe", "protection", "fraud", "theft", "stolen"],
        response: "All cards use EMV chip technology, real-time fraud monitoring and instant transaction alerts, and \
                   you are never liable for unauthorised charges. If your card is lost or stolen, call \
                   +1-800-BNB-VISA straight away.",
    },
    ResponseRule {
        keywords: &["reward", "rewards", "points", "cashback", "earn"],
        response: "Cashback starts at 1% on the Basic Premium card and rises with each tier up to 5% on the World \
                   Elite card. Rewards are credited to your account every month.",
    },
    ResponseRule {
        keywords: &["require", "requirements", "qualify", "eligibility", "who can get"],
        response: "You need to be at least 18 years old and provide a valid ID. Higher tiers may ask for proof of \
                   business revenue, and the Business Visa requires company registration documents.",
    },
    ResponseRule {
        keywords: &["travel", "abroad", "foreign", "international", "countries"],
        response: "Our cards are accepted in over 200 countries and territories. Gold cards and above have no foreign \
                   transaction fees, and travel insurance cover grows with each tier.",
    },
    ResponseRule {
        keywords: &["thank", "thanks", "appreciate", "helpful"],
        response: "You're welcome! If you have any other questions about our cards, just ask.",
    },
    ResponseRule {
        keywords: &["navigation", "where is", "locate", "page"],
        response: WEBSITE_RESPONSE,
    },
    ResponseRule {
        keywords: &["interest", "apr", "annual percentage", "charges"],
        response: "Our cards work as charge cards, not credit cards. The full balance is due each billing cycle, so \
                   there is no interest and no APR. Late payment fees apply if a payment is missed.",
    },
];
