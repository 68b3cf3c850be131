#[cfg(test)]
pub mod test {
    use serde_yaml::Value;

    /// A well-formed document exercising every section, a feature provider,
    /// a tile provider, and an unknown (opaque) provider.
    pub const SAMPLE_YAML: &str = "\
server:
  bind: {host: 0.0.0.0, port: 5000}
  url: http://localhost:5000
  mimetype: application/json; charset=UTF-8
  encoding: utf-8
  map:
    url: https://tile.openstreetmap.org/{z}/{x}/{y}.png
    attribution: OSM contributors
  gzip: false
  cors: true
  pretty_print: true
  limits: {default_items: 20, max_items: 50}
  admin: false
logging:
  level: ERROR
  logfile: /tmp/geocfg.log
metadata:
  identification:
    title: Demo service
    description: Demo geospatial service
    keywords: [demo, geospatial]
    keywords_type: theme
    terms_of_service: https://creativecommons.org/licenses/by/4.0/
    url: https://demo.example.org
  license:
    name: CC-BY 4.0 license
    url: https://creativecommons.org/licenses/by/4.0/
  provider:
    name: Example Org
    url: https://example.org
  contact:
    name: 'Doe, Jan'
    position: Analyst
    address: 1 Main St
    city: Springfield
    stateorprovince: State
    postalcode: '12345'
    country: Country
    phone: '+1-555-0100'
    fax: '+1-555-0101'
    email: jan@example.org
    url: https://example.org/contact
    hours: Mo-Fr 09:00-17:00
    instructions: Email first.
    role: pointOfContact
resources:
  obs:
    type: collection
    title: Observations
    description: Sensor observations
    keywords: [obs]
    extents:
      spatial:
        bbox: [-180, -90, 180, 90]
        crs: http://www.opengis.net/def/crs/OGC/1.3/CRS84
      temporal:
        begin: '2020-01-01T00:00:00Z'
        trs: http://www.opengis.net/def/uom/ISO-8601/0/Gregorian
    providers:
      - type: feature
        name: PostgreSQL
        data:
          host: localhost
          port: 5432
          dbname: obs
          user: reader
          password: secret
          search_path: [osm, public]
        id_field: id
        table: observations
        geom_field: geom
    links:
      - {type: text/html, rel: canonical, href: 'https://example.org/obs'}
    visibility: default
  basemap:
    type: collection
    title: Basemap tiles
    description: Vector tile basemap
    keywords: [tiles]
    extents:
      spatial:
        bbox: [-180, -90, 180, 90]
    providers:
      - type: tile
        name: MVT-proxy
        data: https://tiles.example.org/{z}/{x}/{y}.pbf
        options:
          zoom: {min: 0, max: 14}
          schemes: [WebMercatorQuad]
        format: {name: pbf, mimetype: application/vnd.mapbox-vector-tile}
        crs: ['http://www.opengis.net/def/crs/EPSG/0/3857']
      - type: sensorthings
        name: Unknown
        data: https://st.example.org/v1.1
        intensity: 3
";

    pub fn sample_document() -> Value {
        serde_yaml::from_str(SAMPLE_YAML).unwrap()
    }
}
