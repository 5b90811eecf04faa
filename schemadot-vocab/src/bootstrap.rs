//! Bundled Schema.org subset.

use crate::{SchemaProperty, SchemaType};

fn t(name: &str, parents: &[&str], properties: &[&str]) -> SchemaType {
    SchemaType {
        name: name.into(),
        parents: parents.iter().map(|s| s.to_string()).collect(),
        properties: properties.iter().map(|s| s.to_string()).collect(),
    }
}

fn p(name: &str, range_includes: &[&str]) -> SchemaProperty {
    SchemaProperty {
        name: name.into(),
        range_includes: range_includes.iter().map(|s| s.to_string()).collect(),
        default_range: None,
    }
}

pub(crate) fn types() -> Vec<SchemaType> {
    vec![
        // Data types
        t("DataType", &[], &[]),
        t("Text", &["DataType"], &[]),
        t("URL", &["Text"], &[]),
        t("Number", &["DataType"], &[]),
        t("Integer", &["Number"], &[]),
        t("Float", &["Number"], &[]),
        t("Boolean", &["DataType"], &[]),
        t("Date", &["DataType"], &[]),
        t("DateTime", &["DataType"], &[]),
        t("Time", &["DataType"], &[]),
        // Things
        t(
            "Thing",
            &[],
            &["name", "description", "url", "image", "identifier", "sameAs", "subjectOf", "mainEntityOfPage", "alternateName"],
        ),
        t(
            "CreativeWork",
            &["Thing"],
            &[
                "about", "author", "dateCreated", "dateModified", "datePublished", "headline", "inLanguage",
                "keywords", "text", "review", "aggregateRating", "offers", "isPartOf", "hasPart", "position",
            ],
        ),
        t("Article", &["CreativeWork"], &["articleBody", "wordCount"]),
        t("BlogPosting", &["Article"], &[]),
        t("WebPage", &["CreativeWork"], &["breadcrumb", "mainContentOfPage"]),
        t("MediaObject", &["CreativeWork"], &["contentUrl", "encodingFormat"]),
        t("ImageObject", &["MediaObject"], &["caption"]),
        t("Comment", &["CreativeWork"], &["upvoteCount", "downvoteCount"]),
        t("Answer", &["Comment"], &[]),
        t("Question", &["Comment"], &["acceptedAnswer", "suggestedAnswer", "answerCount"]),
        t("HowTo", &["CreativeWork"], &["step", "totalTime", "supply", "tool"]),
        t("Recipe", &["HowTo"], &["recipeIngredient", "recipeInstructions", "recipeYield"]),
        t("Review", &["CreativeWork"], &["itemReviewed", "reviewRating", "reviewBody"]),
        t("Course", &["CreativeWork"], &["courseCode", "hasCourseInstance"]),
        t("Person", &["Thing"], &["givenName", "familyName", "email", "telephone", "jobTitle", "worksFor", "address"]),
        t("Organization", &["Thing"], &["email", "telephone", "address", "logo", "member", "contactPoint"]),
        t("LocalBusiness", &["Organization", "Place"], &["openingHours", "priceRange"]),
        t("Place", &["Thing"], &["address", "geo", "telephone"]),
        t(
            "Event",
            &["Thing"],
            &["startDate", "endDate", "location", "organizer", "performer", "eventSchedule", "offers", "inLanguage"],
        ),
        t("EducationEvent", &["Event"], &["educationalLevel"]),
        t("Product", &["Thing"], &["offers", "brand", "sku", "review", "aggregateRating"]),
        t("Intangible", &["Thing"], &[]),
        t(
            "Offer",
            &["Intangible"],
            &["price", "priceCurrency", "availability", "itemOffered", "validFrom", "validThrough", "seller"],
        ),
        t("Demand", &["Intangible"], &["itemOffered"]),
        t("Language", &["Intangible"], &[]),
        t("Quantity", &["Intangible"], &[]),
        t("Duration", &["Quantity"], &[]),
        t("ItemList", &["Intangible"], &["itemListElement", "numberOfItems", "itemListOrder"]),
        t("ListItem", &["Intangible"], &["item", "position", "nextItem", "previousItem"]),
        t("HowToStep", &["CreativeWork", "ItemList", "ListItem"], &[]),
        t("HowToSection", &["CreativeWork", "ItemList", "ListItem"], &[]),
        t("HowToSupply", &["ListItem"], &["requiredQuantity"]),
        t("HowToTool", &["ListItem"], &["requiredQuantity"]),
        t("DefinedTerm", &["Intangible"], &["termCode", "inDefinedTermSet"]),
        t(
            "Schedule",
            &["Intangible"],
            &["startDate", "endDate", "startTime", "endTime", "repeatFrequency", "byDay", "scheduleTimezone"],
        ),
        t("Rating", &["Intangible"], &["ratingValue", "bestRating", "worstRating"]),
        t("AggregateRating", &["Rating"], &["ratingCount", "reviewCount", "itemReviewed"]),
        t("StructuredValue", &["Intangible"], &[]),
        t("PropertyValue", &["StructuredValue"], &["propertyID", "value", "unitCode"]),
        t("MonetaryAmount", &["StructuredValue"], &["currency", "value", "minValue", "maxValue"]),
        t("QuantitativeValue", &["StructuredValue"], &["value", "unitCode", "unitText", "minValue", "maxValue"]),
        t("ContactPoint", &["StructuredValue"], &["contactType", "email", "telephone"]),
        t("PostalAddress", &["ContactPoint"], &["streetAddress", "addressLocality", "addressRegion", "postalCode", "addressCountry"]),
        t("GeoCoordinates", &["StructuredValue"], &["latitude", "longitude"]),
        t("Enumeration", &["Intangible"], &[]),
        t("ItemAvailability", &["Enumeration"], &[]),
        t("DayOfWeek", &["Enumeration"], &[]),
    ]
}

pub(crate) fn properties() -> Vec<SchemaProperty> {
    vec![
        p("name", &["Text"]),
        p("alternateName", &["Text"]),
        p("description", &["Text"]),
        p("url", &["URL"]),
        p("sameAs", &["URL"]),
        p("image", &["ImageObject", "URL"]),
        p("identifier", &["PropertyValue", "Text", "URL"]),
        p("subjectOf", &["CreativeWork", "Event"]),
        p("mainEntityOfPage", &["CreativeWork", "URL"]),
        p("about", &["Thing"]),
        p("author", &["Organization", "Person"]),
        p("dateCreated", &["Date", "DateTime"]),
        p("dateModified", &["Date", "DateTime"]),
        p("datePublished", &["Date", "DateTime"]),
        p("headline", &["Text"]),
        p("inLanguage", &["Language", "Text"]),
        p("keywords", &["DefinedTerm", "Text", "URL"]),
        p("text", &["Text"]),
        p("articleBody", &["Text"]),
        p("wordCount", &["Integer"]),
        p("review", &["Review"]),
        p("aggregateRating", &["AggregateRating"]),
        p("offers", &["Offer", "Demand"]),
        p("isPartOf", &["CreativeWork", "URL"]),
        p("hasPart", &["CreativeWork"]),
        p("position", &["Integer", "Text"]),
        p("breadcrumb", &["BreadcrumbList", "Text"]),
        p("mainContentOfPage", &["WebPageElement"]),
        p("contentUrl", &["URL"]),
        p("encodingFormat", &["Text", "URL"]),
        p("caption", &["MediaObject", "Text"]),
        p("upvoteCount", &["Integer"]),
        p("downvoteCount", &["Integer"]),
        p("acceptedAnswer", &["Answer", "ItemList"]),
        p("suggestedAnswer", &["Answer", "ItemList"]),
        p("answerCount", &["Integer"]),
        p("step", &["HowToSection", "HowToStep", "CreativeWork", "Text"]),
        p("totalTime", &["Duration"]),
        p("supply", &["HowToSupply", "Text"]),
        p("tool", &["HowToTool", "Text"]),
        p("recipeIngredient", &["Text"]),
        p("recipeInstructions", &["CreativeWork", "ItemList", "Text"]),
        p("recipeYield", &["QuantitativeValue", "Text"]),
        p("itemReviewed", &["Thing"]),
        p("reviewRating", &["Rating"]),
        p("reviewBody", &["Text"]),
        p("courseCode", &["Text"]),
        p("hasCourseInstance", &["CourseInstance"]),
        p("givenName", &["Text"]),
        p("familyName", &["Text"]),
        p("email", &["Text"]),
        p("telephone", &["Text"]),
        p("jobTitle", &["DefinedTerm", "Text"]),
        p("worksFor", &["Organization"]),
        p("address", &["PostalAddress", "Text"]),
        p("logo", &["ImageObject", "URL"]),
        p("member", &["Organization", "Person"]),
        p("contactPoint", &["ContactPoint"]),
        p("openingHours", &["Text"]),
        p("priceRange", &["Text"]),
        p("geo", &["GeoCoordinates", "GeoShape"]),
        p("startDate", &["Date", "DateTime"]),
        p("endDate", &["Date", "DateTime"]),
        p("startTime", &["DateTime", "Time"]),
        p("endTime", &["DateTime", "Time"]),
        p("location", &["Place", "PostalAddress", "Text", "VirtualLocation"]),
        p("organizer", &["Organization", "Person"]),
        p("performer", &["Organization", "Person"]),
        p("eventSchedule", &["Schedule"]),
        p("educationalLevel", &["DefinedTerm", "Text", "URL"]),
        p("brand", &["Brand", "Organization"]),
        p("sku", &["Text"]),
        p("price", &["Number", "Text"]),
        p("priceCurrency", &["Text"]),
        p("availability", &["ItemAvailability"]),
        p("itemOffered", &["Product", "Service", "Event", "CreativeWork"]),
        p("validFrom", &["Date", "DateTime"]),
        p("validThrough", &["Date", "DateTime"]),
        p("seller", &["Organization", "Person"]),
        p("itemListElement", &["ListItem", "Text", "Thing"]),
        p("numberOfItems", &["Integer"]),
        p("itemListOrder", &["ItemListOrderType", "Text"]),
        p("item", &["Thing"]),
        p("nextItem", &["ListItem"]),
        p("previousItem", &["ListItem"]),
        p("requiredQuantity", &["QuantitativeValue", "Number", "Text"]),
        p("termCode", &["Text"]),
        p("inDefinedTermSet", &["DefinedTermSet", "URL"]),
        p("repeatFrequency", &["Duration", "Text"]),
        p("byDay", &["DayOfWeek", "Text"]),
        p("scheduleTimezone", &["Text"]),
        p("ratingValue", &["Number", "Text"]),
        p("bestRating", &["Number", "Text"]),
        p("worstRating", &["Number", "Text"]),
        p("ratingCount", &["Integer"]),
        p("reviewCount", &["Integer"]),
        p("propertyID", &["Text", "URL"]),
        p("value", &["Boolean", "Number", "StructuredValue", "Text"]),
        p("unitCode", &["Text", "URL"]),
        p("unitText", &["Text"]),
        p("currency", &["Text"]),
        p("minValue", &["Number"]),
        p("maxValue", &["Number"]),
        p("contactType", &["Text"]),
        p("streetAddress", &["Text"]),
        p("addressLocality", &["Text"]),
        p("addressRegion", &["Text"]),
        p("postalCode", &["Text"]),
        p("addressCountry", &["Country", "Text"]),
        p("latitude", &["Number", "Text"]),
        p("longitude", &["Number", "Text"]),
    ]
}
