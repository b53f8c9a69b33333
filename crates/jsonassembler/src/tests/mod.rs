mod property_sources;
